pub mod context;
pub mod decode;
pub mod intent;
pub mod outlet;
pub mod research;
pub mod section_agent;
pub mod synthesis;
pub mod workflow;
