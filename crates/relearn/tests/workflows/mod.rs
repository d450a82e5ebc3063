use super::*;

mod sign_in;
mod sqlite_store;
mod ticks;
