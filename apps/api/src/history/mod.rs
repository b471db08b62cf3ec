// Version history: bounded snapshot store over pluggable key-value storage,
// plus the HTTP handlers exposing it and the diff engine.

pub mod handlers;
pub mod storage;
pub mod store;
