//! Recordatorios de vencimiento por correo
//!
//! Pipeline independiente del panel y más simple que el clasificador:
//! alumno con email + último vencimiento alcanzado → un correo. Corre a
//! demanda (`POST /api/mailing/recordatorios`) o a diario vía
//! [`scheduler::ReminderScheduler`].

pub mod job;
pub mod scheduler;
pub mod service;
pub mod template;

pub use job::{AlumnoVencido, ReminderReport, collect_overdue};
pub use scheduler::ReminderScheduler;
pub use service::MailerService;
