//! Sequential container writing.

use crate::{common::*, encoder::encode_pair, record::Record};
use tempfile::NamedTempFile;
use tfrecord::{ExampleWriter, RecordWriter};

/// Log a progress message per this number of written records.
const PROGRESS_INTERVAL: usize = 1000;

/// The writer appending records to a container file.
///
/// Records go to a hidden temporary file next to the destination. The file is
/// renamed onto the destination by [ContainerWriter::finish]. If the writer is
/// dropped before that, for example when an error is propagated, the temporary
/// file is removed and the destination is left untouched.
pub struct ContainerWriter {
    path: PathBuf,
    file: NamedTempFile,
    writer: ExampleWriter<BufWriter<File>>,
    num_records: usize,
}

impl Debug for ContainerWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerWriter")
            .field("path", &self.path)
            .field("file", &self.file.path())
            .field("num_records", &self.num_records)
            .finish()
    }
}

impl ContainerWriter {
    /// Start writing a container that replaces `path` when finished.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let prefix = match path.file_name() {
            Some(name) => format!(".{}.", name.to_string_lossy()),
            None => ".container.".to_string(),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(".partial");
        // new containers get the usual 0666 mode masked by the umask
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let file = builder.tempfile_in(dir).map_err(Error::io(&path))?;
        debug!(
            "writing container '{}' through '{}'",
            path.display(),
            file.path().display()
        );

        let handle = file.as_file().try_clone().map_err(Error::io(&path))?;
        let writer =
            RecordWriter::from_writer(BufWriter::new(handle)).map_err(Error::record_write(&path))?;

        Ok(Self {
            path,
            file,
            writer,
            num_records: 0,
        })
    }

    /// The destination path of the container.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The number of records written so far.
    pub fn num_records(&self) -> usize {
        self.num_records
    }

    /// Append one record.
    ///
    /// The record is written as is. Inconsistent records are detected by readers.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.writer
            .send(record.to_example())
            .map_err(Error::record_write(&self.path))?;
        self.num_records += 1;

        if self.num_records % PROGRESS_INTERVAL == 0 {
            info!(
                "{} records written to '{}'",
                self.num_records,
                self.path.display()
            );
        }
        Ok(())
    }

    /// Flush all records and move the container to its destination.
    ///
    /// An existing destination keeps its permissions. It returns the number of
    /// written records.
    pub fn finish(self) -> Result<usize> {
        let Self {
            path,
            file,
            mut writer,
            num_records,
        } = self;

        writer.flush().map_err(Error::record_write(&path))?;
        drop(writer);
        file.as_file().sync_all().map_err(Error::io(&path))?;

        match fs::metadata(&path) {
            Ok(metadata) => file
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(Error::io(&path))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(Error::io(&path)(err)),
        }
        file.persist(&path)
            .map_err(|err| Error::io(&path)(err.error))?;

        info!(
            "finished container '{}' with {} records",
            path.display(),
            num_records
        );
        Ok(num_records)
    }
}

/// Write image/annotation file pairs into a container in the given order.
///
/// At most `max_records` pairs are written if it is set. Any failure aborts the
/// whole pass and no container is created. It returns the number of written records.
pub fn write_pairs<I, P, Q>(
    pairs: I,
    path: impl AsRef<Path>,
    max_records: Option<usize>,
) -> Result<usize>
where
    I: IntoIterator<Item = (P, Q)>,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut writer = ContainerWriter::create(path)?;

    pairs
        .into_iter()
        .take(max_records.unwrap_or(usize::MAX))
        .try_for_each(|(image_path, annotation_path)| -> Result<_> {
            let record = encode_pair(image_path, annotation_path)?;
            writer.write_record(&record)
        })?;

    writer.finish()
}

/// Write in-memory records into a container in the given order.
pub fn write_records<'a, I>(records: I, path: impl AsRef<Path>) -> Result<usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = ContainerWriter::create(path)?;
    records
        .into_iter()
        .try_for_each(|record| writer.write_record(record))?;
    writer.finish()
}
