//! # Edit Session
//!
//! At most one product is edited at a time. The session holds a *working copy*; changes to it
//! never touch the snapshot or the store until the engine commits.
//!
//! ```text
//!            begin(R)                 begin(S)  (replaces, no merge)
//!   Idle ───────────────▶ Editing(R') ───────────────▶ Editing(S')
//!    ▲                     │   │  ▲
//!    │  cancel / commit ok │   │  │ edit(..) / commit failed
//!    └─────────────────────┘   └──┘
//! ```

use crate::catalog::error::CatalogError;
use crate::model::{Product, ProductId};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(Product),
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    pub fn working_copy(&self) -> Option<&Product> {
        match self {
            EditSession::Editing(copy) => Some(copy),
            EditSession::Idle => None,
        }
    }

    pub fn editing_id(&self) -> Option<&ProductId> {
        self.working_copy().map(|copy| &copy.id)
    }

    /// Starts editing a deep copy of `product`, discarding any session in progress.
    pub fn begin(&mut self, product: &Product) {
        *self = EditSession::Editing(product.clone());
    }

    /// Mutates the working copy. The id cannot be changed.
    pub fn edit(&mut self, f: impl FnOnce(&mut Product)) -> Result<(), CatalogError> {
        let EditSession::Editing(copy) = self else {
            return Err(CatalogError::NoActiveEdit);
        };
        let id = copy.id.clone();
        f(copy);
        copy.id = id;
        Ok(())
    }

    /// Ends the session, returning the discarded working copy.
    pub fn cancel(&mut self) -> Option<Product> {
        match std::mem::take(self) {
            EditSession::Editing(copy) => Some(copy),
            EditSession::Idle => None,
        }
    }
}
