//! 门面参考实现

pub mod rope;
