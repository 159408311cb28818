use anyhow::Result;
use seg_dataset::{
    CamvidDataset, CocoOptions, CocoStuffDataset, DatasetFamily, PairDataset, PascalSegDataset,
    Split,
};
use std::{fs, path::Path};

fn touch(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, b"")?;
    Ok(())
}

fn write_list(path: impl AsRef<Path>, names: &[&str]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, names.join("\n") + "\n")?;
    Ok(())
}

#[test]
fn camvid_pairs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    for (split, names) in [
        ("train", &["0001TP_006690.png", "0001TP_006720.png", "0001TP_006660.png"][..]),
        ("val", &["0016E5_07959.png"][..]),
        ("test", &[][..]),
    ] {
        fs::create_dir_all(root.join(split))?;
        fs::create_dir_all(root.join(format!("{}annot", split)))?;
        for name in names {
            touch(root.join(split).join(name))?;
            touch(root.join(format!("{}annot", split)).join(name))?;
        }
    }

    let dataset = CamvidDataset::load(root)?;
    assert_eq!(dataset.family(), DatasetFamily::Camvid);
    assert_eq!(dataset.num_pairs(), 4);

    let splits: Vec<_> = dataset.splits().iter().map(|split| split.split).collect();
    assert_eq!(splits, vec![Split::Training, Split::Validation, Split::Testing]);

    let train = &dataset.split(Split::Training).unwrap().pairs;
    let names: Vec<_> = train
        .iter()
        .map(|(image, _)| image.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["0001TP_006660.png", "0001TP_006690.png", "0001TP_006720.png"]
    );
    for (image, annotation) in train {
        assert_eq!(image.parent().unwrap(), root.join("train"));
        assert_eq!(annotation.parent().unwrap(), root.join("trainannot"));
        assert_eq!(image.file_name(), annotation.file_name());
    }

    let val = &dataset.split(Split::Validation).unwrap().pairs;
    assert_eq!(
        val,
        &vec![(
            root.join("val").join("0016E5_07959.png"),
            root.join("valannot").join("0016E5_07959.png")
        )]
    );
    assert!(dataset.split(Split::Testing).unwrap().pairs.is_empty());
    Ok(())
}

#[test]
fn camvid_missing_directory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("train"))?;
    fs::create_dir_all(dir.path().join("trainannot"))?;

    let err = CamvidDataset::load(dir.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("val"));

    assert!(CamvidDataset::load(dir.path().join("nowhere")).is_err());
    Ok(())
}

#[test]
fn coco_stuff_pairs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    let labels = root.join("stuffthings_pixellabels");
    for name in ["000000000285.png", "000000000139.png"] {
        touch(labels.join("train2017").join(name))?;
    }
    touch(labels.join("train2017").join("README.txt"))?;
    touch(labels.join("val2017").join("000000000632.png"))?;

    let dataset = CocoStuffDataset::load(root, CocoOptions::default())?;
    assert_eq!(dataset.family(), DatasetFamily::Coco);

    let train = &dataset.split(Split::Training).unwrap().pairs;
    assert_eq!(
        train,
        &vec![
            (
                root.join("train2017").join("000000000139.jpg"),
                labels.join("train2017").join("000000000139.png")
            ),
            (
                root.join("train2017").join("000000000285.jpg"),
                labels.join("train2017").join("000000000285.png")
            ),
        ]
    );
    let val = &dataset.split(Split::Validation).unwrap().pairs;
    assert_eq!(val.len(), 1);
    assert!(dataset.split(Split::Testing).is_none());
    Ok(())
}

#[test]
fn coco_stuff_custom_options() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path();
    touch(root.join("labels").join("train").join("a.png"))?;
    fs::create_dir_all(root.join("labels").join("val"))?;

    let options = CocoOptions {
        labels_subfolder: "labels".into(),
        train_dir: "train".into(),
        val_dir: "val".into(),
    };
    let dataset = CocoStuffDataset::load(root, options)?;
    assert_eq!(
        dataset.split(Split::Training).unwrap().pairs,
        vec![(root.join("train").join("a.jpg"), root.join("labels/train/a.png"))]
    );

    let err = CocoStuffDataset::load(root, CocoOptions::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("stuffthings_pixellabels"));
    Ok(())
}

#[test]
fn pascal_augmented_pairs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let voc = dir.path().join("VOCdevkit").join("VOC2012");
    let sbd = dir.path().join("benchmark_RELEASE");

    let segmentation = voc.join("ImageSets").join("Segmentation");
    write_list(segmentation.join("train.txt"), &["2007_000032", "2007_000039"])?;
    write_list(segmentation.join("val.txt"), &["2007_000033", "2007_000042"])?;
    write_list(
        sbd.join("dataset").join("train.txt"),
        &["2008_000002", "2007_000033", "2007_000039"],
    )?;
    write_list(sbd.join("dataset").join("val.txt"), &["2008_000003", "2007_000042"])?;
    fs::create_dir_all(voc.join("SegmentationClass"))?;
    fs::create_dir_all(sbd.join("dataset").join("cls_png"))?;

    let dataset = PascalSegDataset::load(&voc, &sbd)?;
    assert_eq!(dataset.family(), DatasetFamily::PascalSeg);
    let order: Vec<_> = dataset.splits().iter().map(|split| split.split).collect();
    assert_eq!(order, vec![Split::Validation, Split::Training]);

    let voc_pair = |name: &str| {
        (
            voc.join("JPEGImages").join(format!("{}.jpg", name)),
            voc.join("SegmentationClass").join(format!("{}.png", name)),
        )
    };
    let sbd_pair = |name: &str| {
        (
            voc.join("JPEGImages").join(format!("{}.jpg", name)),
            sbd.join("dataset")
                .join("cls_png")
                .join(format!("{}.png", name)),
        )
    };

    assert_eq!(
        dataset.split(Split::Validation).unwrap().pairs,
        vec![voc_pair("2007_000033"), voc_pair("2007_000042")]
    );
    assert_eq!(
        dataset.split(Split::Training).unwrap().pairs,
        vec![
            voc_pair("2007_000032"),
            voc_pair("2007_000039"),
            sbd_pair("2008_000002"),
            sbd_pair("2008_000003"),
        ]
    );
    Ok(())
}

#[test]
fn pascal_requires_converted_sbd_annotations() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let voc = dir.path().join("VOC2012");
    let sbd = dir.path().join("benchmark_RELEASE");

    let segmentation = voc.join("ImageSets").join("Segmentation");
    write_list(segmentation.join("train.txt"), &["2007_000032"])?;
    write_list(segmentation.join("val.txt"), &["2007_000033"])?;
    write_list(sbd.join("dataset").join("train.txt"), &["2008_000002"])?;
    write_list(sbd.join("dataset").join("val.txt"), &[])?;
    fs::create_dir_all(voc.join("SegmentationClass"))?;

    let err = PascalSegDataset::load(&voc, &sbd).unwrap_err();
    assert!(format!("{:#}", err).contains("cls_png"));

    // not needed when every training name is in the VOC lists
    write_list(sbd.join("dataset").join("train.txt"), &["2007_000032"])?;
    let dataset = PascalSegDataset::load(&voc, &sbd)?;
    assert_eq!(dataset.num_pairs(), 2);
    Ok(())
}
