mod common;
mod create;
