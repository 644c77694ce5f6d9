mod bus;
mod events;
mod gate;
mod handlers;

pub use bus::{EventBus, HandlerId};
pub use events::OverlayEvent;
pub use gate::{NotificationGate, SuppressionGuard};
pub use handlers::{CanvasLook, CanvasLookHandler, InfoBox, InfoBoxHandler};

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &OverlayEvent);
}
