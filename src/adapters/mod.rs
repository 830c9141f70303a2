// Adapters layer: concrete implementations of the domain ports.

pub mod local;
pub mod pacer;
pub mod smtp;
pub mod supabase;

pub use local::LocalStorage;
pub use pacer::TokioPacer;
pub use smtp::SmtpMailer;
pub use supabase::SupabaseLeadStore;
