use super::*;
use crate::config::UserConfig;
use crate::downloader::test_helpers::*;
use crate::error::{ApiError, Error, ValidationError};
use std::path::{Path, PathBuf};

mod pipeline;
