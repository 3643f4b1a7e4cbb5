//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod speech;
pub mod telegram;

pub use speech::*;
pub use telegram::*;
