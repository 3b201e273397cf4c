//! The scheduling policies, one file each, plus the process control block
//! they share.

mod process_block;
pub use process_block::ProcessBlock;

mod fifo;
pub use fifo::{FifoScheduler, FifoSelection};

mod sjf;
pub use sjf::ShortestJobFirst;

mod round_robin;
pub use round_robin::RoundRobinScheduler;

mod mlfq;
pub use mlfq::MultiLevelFeedbackQueue;
