mod dispatch_due_reminders;

pub use dispatch_due_reminders::{DispatchDueRemindersUseCase, DispatchSummary};
