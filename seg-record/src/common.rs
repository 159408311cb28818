pub use crate::error::{Error, Result};
pub use log::{debug, info, warn};
pub use ndarray::{Array2, Array3, ArrayD, Axis};
pub use serde::{Deserialize, Serialize};
pub use std::{
    collections::BTreeMap,
    convert::{TryFrom, TryInto},
    fmt,
    fmt::Debug,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    str::FromStr,
};
