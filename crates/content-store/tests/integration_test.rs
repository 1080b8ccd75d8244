use async_trait::async_trait;
use content_store::{StoreActor, StoreError, StoredResource};

// --- Test Resource ---

#[derive(Clone, Debug, PartialEq)]
struct Bookmark {
    id: u64,
    url: String,
    starred: bool,
}

#[derive(Debug)]
struct BookmarkCreate {
    url: String,
}

#[derive(Debug)]
struct BookmarkUpdate {
    url: Option<String>,
}

#[derive(Debug)]
enum BookmarkAction {
    Star,
}

#[derive(Debug, Default)]
struct BookmarkFilter {
    starred: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
#[error("Bookmark URL must not be empty")]
struct BookmarkError;

#[async_trait]
impl StoredResource for Bookmark {
    type Id = u64;
    type Create = BookmarkCreate;
    type Update = BookmarkUpdate;
    type Action = BookmarkAction;
    type ActionResult = bool;
    type Filter = BookmarkFilter;
    type Context = ();
    type Error = BookmarkError;

    fn from_create_params(id: u64, params: BookmarkCreate) -> Result<Self, Self::Error> {
        if params.url.is_empty() {
            return Err(BookmarkError);
        }
        Ok(Self {
            id,
            url: params.url,
            starred: false,
        })
    }

    fn matches(&self, filter: &BookmarkFilter) -> bool {
        filter.starred.map_or(true, |starred| self.starred == starred)
    }

    async fn on_update(&mut self, update: BookmarkUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(url) = update.url {
            self.url = url;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BookmarkAction,
        _ctx: &(),
    ) -> Result<bool, Self::Error> {
        match action {
            BookmarkAction::Star => {
                let changed = !self.starred;
                self.starred = true;
                Ok(changed)
            }
        }
    }
}

fn create(url: &str) -> BookmarkCreate {
    BookmarkCreate {
        url: url.to_string(),
    }
}

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (actor, client) = StoreActor::<Bookmark>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id = client.create(create("https://example.com")).await.unwrap();
    assert_eq!(id, 1);

    assert!(client.perform_action(id, BookmarkAction::Star).await.unwrap());
    assert!(!client.perform_action(id, BookmarkAction::Star).await.unwrap());

    let updated = client
        .update(
            id,
            BookmarkUpdate {
                url: Some("https://example.org".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.url, "https://example.org");
    assert!(updated.starred);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(StoreError::NotFound(_))
    ));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_import_moves_counter_and_rejects_duplicates() {
    let (actor, client) = StoreActor::<Bookmark>::new(10);
    tokio::spawn(actor.run(()));

    assert_eq!(client.import(40, create("https://a.test")).await.unwrap(), 40);
    assert!(matches!(
        client.import(40, create("https://b.test")).await,
        Err(StoreError::AlreadyExists(id)) if id == "40"
    ));

    // Plain creates continue after the highest imported ID.
    assert_eq!(client.create(create("https://c.test")).await.unwrap(), 41);
}

#[tokio::test]
async fn test_import_at_max_id_exhausts_counter_without_overflow() {
    let (actor, client) = StoreActor::<Bookmark>::new(10);
    let handle = tokio::spawn(actor.run(()));

    assert_eq!(
        client.import(u64::MAX, create("https://last.test")).await.unwrap(),
        u64::MAX
    );
    // The counter cannot move past the top ID, so creates are refused.
    assert!(matches!(
        client.create(create("https://next.test")).await,
        Err(StoreError::AlreadyExists(id)) if id == u64::MAX.to_string()
    ));
    // The stored resource is untouched and lower IDs still import.
    let last = client.get(u64::MAX).await.unwrap().unwrap();
    assert_eq!(last.url, "https://last.test");
    assert_eq!(client.import(7, create("https://seven.test")).await.unwrap(), 7);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_create_failure_is_entity_error() {
    let (actor, client) = StoreActor::<Bookmark>::new(10);
    tokio::spawn(actor.run(()));

    let result = client.create(create("")).await;
    assert!(matches!(result, Err(StoreError::EntityError(_))));
}

#[tokio::test]
async fn test_query_returns_matches_in_id_order() {
    let (actor, client) = StoreActor::<Bookmark>::new(10);
    tokio::spawn(actor.run(()));

    client.import(9, create("https://nine.test")).await.unwrap();
    client.import(2, create("https://two.test")).await.unwrap();
    client.import(5, create("https://five.test")).await.unwrap();
    client.perform_action(9, BookmarkAction::Star).await.unwrap();
    client.perform_action(2, BookmarkAction::Star).await.unwrap();

    let all = client.query(BookmarkFilter::default()).await.unwrap();
    let ids: Vec<u64> = all.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 5, 9]);

    let starred = client
        .query(BookmarkFilter {
            starred: Some(true),
        })
        .await
        .unwrap();
    let ids: Vec<u64> = starred.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 9]);
}

#[tokio::test]
async fn test_closed_store_reports_actor_closed() {
    let (actor, client) = StoreActor::<Bookmark>::new(10);
    drop(actor);

    assert!(matches!(client.get(1).await, Err(StoreError::ActorClosed)));
}
