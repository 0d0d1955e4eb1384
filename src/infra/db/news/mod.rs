mod read;
mod types;
mod write;

use super::{NEWS_COLUMNS, PostgresRepositories};
