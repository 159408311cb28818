//! Sequential container reading.

use crate::{common::*, record::Record, shape::ShapePolicy};
use tfrecord::{ExampleReader, RecordReaderConfig};

/// Options of container readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Verify frame checksums while reading.
    #[serde(default = "default_check_integrity")]
    pub check_integrity: bool,
}

fn default_check_integrity() -> bool {
    true
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            check_integrity: default_check_integrity(),
        }
    }
}

/// The iterator of records stored in a container.
///
/// Records are yielded lazily in file order. The iterator stops after the first
/// error.
pub struct ContainerReader<R = BufReader<File>> {
    reader: ExampleReader<R>,
    path: PathBuf,
    config: ReaderConfig,
    index: usize,
    done: bool,
}

impl<R> Debug for ContainerReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerReader")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("index", &self.index)
            .field("done", &self.done)
            .finish()
    }
}

impl ContainerReader<BufReader<File>> {
    /// Open a container file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open a container file.
    pub fn open_with_config(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingInput {
                path: path.to_owned(),
            });
        }
        let file = File::open(path).map_err(Error::io(path))?;
        debug!("reading container '{}'", path.display());
        Self::from_reader(BufReader::new(file), path, config)
    }
}

impl<R> ContainerReader<R>
where
    R: Read,
{
    /// Read a container from an arbitrary reader. The path is only used in error messages.
    pub fn from_reader(reader: R, path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let reader = RecordReaderConfig {
            check_integrity: config.check_integrity,
        }
        .from_reader(reader)
        .map_err(|err| Error::corrupt(format!("'{}': {}", path.display(), err)))?;

        Ok(Self {
            reader,
            path,
            config,
            index: 0,
            done: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The number of records yielded so far.
    pub fn num_read(&self) -> usize {
        self.index
    }

    /// Turn into an iterator of decoded images and policy-shaped annotations.
    pub fn decoded(
        self,
        policy: ShapePolicy,
    ) -> impl Iterator<Item = Result<(Array3<u8>, ArrayD<u8>)>> {
        self.map(move |record| record?.decode_with_policy(policy))
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        let next = self.reader.next();
        let tag = |reason: &dyn fmt::Display| {
            Error::corrupt(format!(
                "record {} of '{}': {}",
                self.index,
                self.path.display(),
                reason
            ))
        };

        let example = match next {
            Some(Ok(example)) => example,
            Some(Err(err)) => return Err(tag(&err)),
            None => return Ok(None),
        };
        let record = Record::from_example(example).map_err(|err| match err {
            Error::CorruptRecord(reason) => tag(&reason),
            err => err,
        })?;
        Ok(Some(record))
    }
}

impl<R> Iterator for ContainerReader<R>
where
    R: Read,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_record() {
            Ok(Some(record)) => {
                self.index += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                debug!(
                    "reached the end of '{}' after {} records",
                    self.path.display(),
                    self.index
                );
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<R> std::iter::FusedIterator for ContainerReader<R> where R: Read {}

/// Read all records of a container in file order.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    ContainerReader::open(path)?.collect()
}

/// Read all image/annotation pairs of a container in file order.
///
/// Images are shaped `(H, W, C)` with `C` inferred from the stored byte count and
/// annotations are shaped `(H, W)`. Any corrupt record fails the whole call.
pub fn read_image_annotation_pairs(
    path: impl AsRef<Path>,
) -> Result<Vec<(Array3<u8>, Array2<u8>)>> {
    let path = path.as_ref();
    let pairs = ContainerReader::open(path)?
        .map(|record| record?.decode_pair())
        .collect::<Result<Vec<_>>>()?;
    info!("read {} pairs from '{}'", pairs.len(), path.display());
    Ok(pairs)
}
