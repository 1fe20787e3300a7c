pub mod files;
pub mod schedule;
pub mod store;
pub mod streaks;
pub mod tasks;

pub use files::{
    atomic_write, config_file, ensure_flowtime_dir, init_local_flowtime, read_file, report_file,
};
pub use schedule::SchedulePlanner;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use streaks::StreakTracker;
pub use tasks::TaskRepository;
