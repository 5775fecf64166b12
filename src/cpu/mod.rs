pub mod parallel;
pub mod sequential;

pub use parallel::reduce_parallel;
pub use sequential::reduce_sequential;
