pub mod progress_formatter;
pub mod toast_queue;

pub use toast_queue::{Toast, ToastPhase, ToastQueue};
