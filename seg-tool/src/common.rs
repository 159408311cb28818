pub use anyhow::{bail, ensure, format_err, Context, Error, Result};
pub use itertools::Itertools as _;
pub use log::{debug, info, warn};
pub use serde::{Deserialize, Serialize};
pub use std::{
    env, fs,
    path::{Path, PathBuf},
};
