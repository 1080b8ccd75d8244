use crate::clients::{CommentClient, PostClient, TermClient};
use crate::{comment_store, post_store, term_store};
use tracing::{error, info};

/// Owns the running store actors and the clients used to reach them.
///
/// ```ignore
/// let system = ContentSystem::new();
/// let term = system.term_client.create_term(params).await?;
/// // ...
/// system.shutdown().await?;
/// ```
pub struct ContentSystem {
    pub post_client: PostClient,
    pub term_client: TermClient,
    pub comment_client: CommentClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ContentSystem {
    /// Spawns the term, post and comment stores. Must be called inside a Tokio
    /// runtime.
    pub fn new() -> Self {
        let (term_actor, term_client) = term_store::new();
        let (post_actor, post_client) = post_store::new();
        let (comment_actor, comment_client) = comment_store::new();

        let term_handle = tokio::spawn(term_actor.run(()));
        // Posts validate their terms, comments validate their post.
        let post_handle = tokio::spawn(post_actor.run(term_client.clone()));
        let comment_handle = tokio::spawn(comment_actor.run(post_client.clone()));

        info!("Content stores started");
        Self {
            post_client,
            term_client,
            comment_client,
            handles: vec![comment_handle, post_handle, term_handle],
        }
    }

    /// Drops every client and waits for the actors to drain and exit.
    ///
    /// Clones of the clients still held elsewhere (an assembler, a router)
    /// keep their actor alive, so drop those first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down content stores...");
        drop(self.comment_client);
        drop(self.post_client);
        drop(self.term_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Content stores stopped.");
        Ok(())
    }
}

impl Default for ContentSystem {
    fn default() -> Self {
        Self::new()
    }
}
