use chrono::NaiveDate;

/// A committed change to the plan store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEvent {
    Created { plan_id: String, date: NaiveDate },
    Updated { plan_id: String, date: NaiveDate },
    Deleted { plan_id: String, steps_removed: usize },
    Seeded { plan_id: String, date: NaiveDate },
}

impl PlanEvent {
    pub fn plan_id(&self) -> &str {
        match self {
            Self::Created { plan_id, .. }
            | Self::Updated { plan_id, .. }
            | Self::Deleted { plan_id, .. }
            | Self::Seeded { plan_id, .. } => plan_id,
        }
    }
}

type Handler = Box<dyn FnMut(&PlanEvent)>;

/// Fan-out of plan events to whatever is presenting them.
///
/// Handlers run synchronously, in subscription order, after the change has
/// been committed.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Handler>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&PlanEvent) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn publish(&mut self, event: &PlanEvent) {
        tracing::debug!(?event, subscribers = self.handlers.len(), "publishing plan event");
        for handler in &mut self.handlers {
            handler(event);
        }
    }

    /// Subscriber that records each event through `tracing`.
    pub fn with_logging(mut self) -> Self {
        self.subscribe(|event| match event {
            PlanEvent::Created { plan_id, date } => tracing::info!(%plan_id, %date, "plan created"),
            PlanEvent::Updated { plan_id, date } => tracing::info!(%plan_id, %date, "plan updated"),
            PlanEvent::Deleted { plan_id, steps_removed } => {
                tracing::info!(%plan_id, steps_removed, "plan deleted")
            }
            PlanEvent::Seeded { plan_id, date } => tracing::info!(%plan_id, %date, "seed plan created"),
        });
        self
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
