//! [`StoredResource`] implementation for [`Term`].
//!
//! Terms have no dependencies on other stores, so their context is `()`.

use super::actions::{TermAction, TermActionResult};
use super::error::TermError;
use crate::model::{Term, TermCreate, TermFilter, TermId, TermUpdate};
use async_trait::async_trait;
use content_store::StoredResource;

#[async_trait]
impl StoredResource for Term {
    type Id = TermId;
    type Create = TermCreate;
    type Update = TermUpdate;
    type Action = TermAction;
    type ActionResult = TermActionResult;
    type Filter = TermFilter;
    type Context = ();
    type Error = TermError;

    fn from_create_params(id: TermId, params: TermCreate) -> Result<Self, TermError> {
        if params.name.trim().is_empty() {
            return Err(TermError::EmptyName);
        }
        if params.taxonomy.trim().is_empty() {
            return Err(TermError::EmptyTaxonomy);
        }
        Ok(Term::new(id, params))
    }

    fn matches(&self, filter: &TermFilter) -> bool {
        filter.matches(self)
    }

    async fn on_update(&mut self, update: TermUpdate, _ctx: &()) -> Result<(), TermError> {
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(TermError::EmptyName);
            }
            self.name = name;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(parent) = update.parent {
            self.parent = parent;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: TermAction,
        _ctx: &(),
    ) -> Result<TermActionResult, TermError> {
        match action {
            TermAction::SetMeta { key, value } => {
                if key.is_empty() {
                    return Err(TermError::EmptyMetaKey);
                }
                Ok(TermActionResult::SetMeta(self.meta.insert(key, value)))
            }
            TermAction::DeleteMeta(key) => Ok(TermActionResult::DeleteMeta(self.meta.remove(&key))),
        }
    }
}
