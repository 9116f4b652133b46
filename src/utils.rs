mod now;

pub use now::now_ms;
