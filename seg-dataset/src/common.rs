pub use anyhow::{bail, ensure, format_err, Context, Error, Result};
pub use indexmap::IndexSet;
pub use itertools::Itertools as _;
pub use log::{debug, info, warn};
pub use serde::{Deserialize, Serialize};
pub use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
pub use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator as _, IntoStaticStr};
