use anyhow::Result;
use clap::Parser;
use itertools::Itertools as _;
use log::{info, LevelFilter};
use prettytable::{cell, row, Table};
use seg_dataset::DatasetFamily;
use seg_record::ShapePolicy;
use seg_tool::Config;
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Parser)]
/// Convert segmentation datasets to record containers and inspect them.
enum Opts {
    /// Convert a dataset to training, validation and testing containers.
    Convert(ConvertArgs),
    /// Decode every record of a container and print a summary.
    Inspect {
        /// container file
        file: PathBuf,
        /// annotation shape, one of 2-dim, 3-dim or 3-dim-squeeze
        #[clap(long, default_value = "3-dim")]
        shape_policy: ShapePolicy,
        /// skip checksum verification
        #[clap(long)]
        no_check_integrity: bool,
    },
}

#[derive(Debug, Clone, Parser)]
struct ConvertArgs {
    /// dataset directory, defaults to /data/<dataset_family>
    #[clap(short = 'p', long)]
    datapath: Option<PathBuf>,
    /// dataset to convert: camvid, coco or pascal_seg
    #[clap(long, alias = "dataset_family")]
    dataset_family: Option<DatasetFamily>,
    /// VOC 2012 directory, defaults to <datapath>/VOCdevkit/VOC2012
    #[clap(long, alias = "voc_path")]
    voc_path: Option<PathBuf>,
    /// write at most this number of records per container
    #[clap(long)]
    max_records: Option<usize>,
    /// optional json5 configuration file, overridden by the other options
    #[clap(long)]
    config_file: Option<PathBuf>,
}

impl ConvertArgs {
    fn into_config(self) -> Result<Config> {
        let Self {
            datapath,
            dataset_family,
            voc_path,
            max_records,
            config_file,
        } = self;

        let config = match &config_file {
            Some(path) => Config::open(path)?,
            None => Config::default(),
        };

        Ok(Config {
            dataset_family: dataset_family.unwrap_or(config.dataset_family),
            datapath: datapath.or(config.datapath),
            voc_path: voc_path.or(config.voc_path),
            max_records: max_records.or(config.max_records),
            ..config
        })
    }
}

fn main() -> Result<()> {
    let mut logger = pretty_env_logger::formatted_builder();
    match env::var("RUST_LOG") {
        Ok(filters) => logger.parse_filters(&filters),
        Err(_) => logger.filter_level(LevelFilter::Info),
    };
    logger.init();

    match Opts::parse() {
        Opts::Convert(args) => convert(args)?,
        Opts::Inspect {
            file,
            shape_policy,
            no_check_integrity,
        } => inspect(file, shape_policy, !no_check_integrity)?,
    }

    Ok(())
}

fn convert(args: ConvertArgs) -> Result<()> {
    let config = args.into_config()?;
    let summaries = seg_tool::convert(&config)?;

    let mut table = Table::new();
    table.add_row(row!["split", "output", "pairs", "records"]);
    summaries.iter().for_each(|summary| {
        table.add_row(row![
            summary.split,
            summary.output_path.display(),
            summary.num_pairs,
            summary.num_records
        ]);
    });
    table.printstd();

    Ok(())
}

fn inspect(file: PathBuf, policy: ShapePolicy, check_integrity: bool) -> Result<()> {
    let summaries = seg_tool::inspect(&file, policy, check_integrity)?;

    let mut table = Table::new();
    table.add_row(row![
        "index",
        "height",
        "width",
        "image shape",
        "mask shape",
        "class indices"
    ]);
    summaries.iter().for_each(|summary| {
        table.add_row(row![
            summary.index,
            summary.height,
            summary.width,
            format!("{:?}", summary.image_shape),
            format!("{:?}", summary.annotation_shape),
            summary.class_indices.iter().join(", ")
        ]);
    });
    table.printstd();

    info!(
        "{} records in '{}' decoded with {} annotations",
        summaries.len(),
        file.display(),
        policy
    );
    Ok(())
}
