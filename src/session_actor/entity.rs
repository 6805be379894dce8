//! [`ActorEntity`] implementation for [`Draft`]: the composition state machine.
//!
//! ```text
//! Idle --Start--> AwaitingLabel --Text--> AwaitingDuration --Text--> SelectingItems
//!                                                                     |  AddItem / RemoveItem / Clear
//!                                                                     '--Submit--> Idle
//! ```
//!
//! `Start` and `Restart` blank the draft from any step. Anything else that does
//! not fit the current step is answered with [`Reply::RestartRequired`] and
//! changes nothing.

use crate::framework::ActorEntity;
use crate::model::{
    Catalog, Draft, Intent, MenuView, Reply, Step, UserId, ValidationError, MAX_PREP_MINUTES,
    MIN_PREP_MINUTES,
};
use crate::session_actor::{SessionContext, SessionError};
use async_trait::async_trait;
use tracing::{debug, info, warn};

#[async_trait]
impl ActorEntity for Draft {
    type Id = UserId;
    type Action = Intent;
    type ActionResult = Reply;
    type Context = SessionContext;
    type Error = SessionError;

    fn from_id(id: &UserId) -> Self {
        Draft::new(id.clone())
    }

    /// Applies one intent and says what the user should see next.
    async fn handle_action(&mut self, intent: Intent, ctx: &SessionContext) -> Result<Reply, SessionError> {
        let reply = match (self.step, intent) {
            (_, Intent::Start | Intent::Restart) => {
                self.reset(Step::AwaitingLabel);
                Reply::AskLabel
            }
            (Step::AwaitingLabel, Intent::Text(text)) => self.accept_label(&text),
            (Step::AwaitingDuration, Intent::Text(text)) => self.accept_duration(&text, &ctx.catalog),
            (Step::SelectingItems, Intent::AddItem(name)) => self.add_item(&name, &ctx.catalog),
            (Step::SelectingItems, Intent::RemoveItem(name)) => self.remove_item(&name, &ctx.catalog),
            (Step::SelectingItems, Intent::Clear) => {
                self.cart.clear();
                Reply::Menu(self.menu(&ctx.catalog))
            }
            (Step::SelectingItems, Intent::Submit) => self.submit(ctx).await,
            (step, intent) => {
                debug!(user = %self.user, ?step, ?intent, "Intent does not fit step");
                Reply::RestartRequired
            }
        };
        Ok(reply)
    }

    fn on_evict(&self) {
        if self.step != Step::Idle {
            info!(user = %self.user, step = ?self.step, "Abandoned draft discarded");
        }
    }
}

impl Draft {
    fn menu(&self, catalog: &Catalog) -> MenuView {
        MenuView::build(self, catalog)
    }

    fn invalid(&self, reason: ValidationError, catalog: Option<&Catalog>) -> Reply {
        debug!(user = %self.user, %reason, "Invalid input");
        Reply::Invalid {
            reason,
            menu: catalog.map(|catalog| self.menu(catalog)),
        }
    }

    fn accept_label(&mut self, text: &str) -> Reply {
        let label = text.trim();
        if label.is_empty() {
            return self.invalid(ValidationError::EmptyLabel, None);
        }
        self.label = label.to_string();
        self.step = Step::AwaitingDuration;
        Reply::AskDuration
    }

    fn accept_duration(&mut self, text: &str, catalog: &Catalog) -> Reply {
        match text.trim().parse::<u32>() {
            Ok(minutes) if (MIN_PREP_MINUTES..=MAX_PREP_MINUTES).contains(&minutes) => {
                self.prep_duration_minutes = Some(minutes);
                self.step = Step::SelectingItems;
                Reply::Menu(self.menu(catalog))
            }
            _ => self.invalid(ValidationError::InvalidDuration, None),
        }
    }

    fn add_item(&mut self, name: &str, catalog: &Catalog) -> Reply {
        let Some(category) = catalog.category_of(name) else {
            return self.invalid(ValidationError::UnknownItem(name.to_string()), Some(catalog));
        };
        self.active_category = Some(category.key.clone());
        self.cart.add(name);
        Reply::Menu(self.menu(catalog))
    }

    fn remove_item(&mut self, name: &str, catalog: &Catalog) -> Reply {
        if let Some(category) = catalog.category_of(name) {
            self.active_category = Some(category.key.clone());
        }
        self.cart.remove(name);
        Reply::Menu(self.menu(catalog))
    }

    async fn submit(&mut self, ctx: &SessionContext) -> Reply {
        match ctx.board.submit(self.to_create()).await {
            Ok(Ok(order)) => {
                info!(user = %self.user, order_id = %order.id, label = %order.label, "Draft submitted");
                self.reset(Step::Idle);
                Reply::Submitted(order)
            }
            Ok(Err(reason)) => self.invalid(reason, Some(ctx.catalog.as_ref())),
            Err(e) => {
                warn!(user = %self.user, error = %e, "Board unavailable, draft kept");
                Reply::Unavailable
            }
        }
    }
}
