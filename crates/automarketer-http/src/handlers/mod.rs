//! Route handlers, one module per area of the API.

pub mod generate;
pub mod health;
pub mod publish;
pub mod scheduler;

pub use generate::generate_best;
pub use health::health_check;
pub use publish::publish;
pub use scheduler::{
    get_peak_hours, get_queue, get_status, post_now, schedule_post, start_auto_post,
    stop_auto_post, update_peak_hours,
};
