// Unit tests for domain models

use super::*;

#[test]
fn test_timecodes_bracket_detections() {
    let timecodes = Timecodes::from_detections(vec![3.0, 6.5], 10.0).unwrap();
    assert_eq!(timecodes.as_slice(), &[0.0, 3.0, 6.5, 10.0]);
    assert_eq!(timecodes.segment_count(), 3);
}

#[test]
fn test_timecodes_without_detections() {
    let timecodes = Timecodes::from_detections(Vec::new(), 42.5).unwrap();
    assert_eq!(timecodes.as_slice(), &[0.0, 42.5]);
    assert_eq!(timecodes.segment_count(), 1);
}

#[test]
fn test_timecodes_drop_out_of_range_and_duplicates() {
    let timecodes =
        Timecodes::from_detections(vec![6.5, 0.0, 3.0, 3.0, 10.0, 12.0, -1.0, f64::NAN], 10.0)
            .unwrap();
    assert_eq!(timecodes.as_slice(), &[0.0, 3.0, 6.5, 10.0]);
}

#[test]
fn test_timecodes_first_and_last_are_exact() {
    let timecodes = Timecodes::from_detections(vec![0.04, 9.96], 10.0).unwrap();
    let slice = timecodes.as_slice();
    assert_eq!(slice[0], 0.0);
    assert_eq!(slice[slice.len() - 1], 10.0);
    assert!(slice.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_timecodes_invalid_duration() {
    assert!(matches!(
        Timecodes::from_detections(vec![1.0], 0.0),
        Err(DomainError::InvalidDuration(_))
    ));
    assert!(Timecodes::from_detections(vec![1.0], -3.0).is_err());
    assert!(Timecodes::from_detections(vec![1.0], f64::INFINITY).is_err());
}

#[test]
fn test_segments_named_sequentially() {
    let timecodes = Timecodes::from_detections(vec![3.0, 6.5], 10.0).unwrap();
    let segments = timecodes.segments();

    let names: Vec<&str> = segments.iter().map(|(name, _)| name.file_name()).collect();
    assert_eq!(names, vec!["001.mp4", "002.mp4", "003.mp4"]);

    let ranges: Vec<SegmentRange> = segments.iter().map(|(_, range)| *range).collect();
    assert_eq!(ranges[0], SegmentRange { start: 0.0, end: 3.0 });
    assert_eq!(ranges[1], SegmentRange { start: 3.0, end: 6.5 });
    assert_eq!(ranges[2], SegmentRange { start: 6.5, end: 10.0 });
}

#[test]
fn test_segment_indices_cover_one_to_count() {
    let detections: Vec<f64> = (1..250).map(|i| i as f64 * 0.5).collect();
    let timecodes = Timecodes::from_detections(detections, 200.0).unwrap();
    let segments = timecodes.segments();

    assert_eq!(segments.len(), timecodes.segment_count());
    for (i, (name, _)) in segments.iter().enumerate() {
        assert_eq!(name.index() as usize, i + 1);
        assert_eq!(name.file_name().len(), "000.mp4".len());
    }
}

#[test]
fn test_segment_width_grows_past_999() {
    assert_eq!(SegmentName::width_for(1), 3);
    assert_eq!(SegmentName::width_for(999), 3);
    assert_eq!(SegmentName::width_for(1000), 4);
    assert_eq!(SegmentName::new(7, 4).file_name(), "0007.mp4");
}

#[test]
fn test_segment_name_parse() {
    let name = SegmentName::parse("042.mp4").unwrap();
    assert_eq!(name.index(), 42);
    assert_eq!(name.file_name(), "042.mp4");

    assert!(SegmentName::parse("h042.mp4").is_none());
    assert!(SegmentName::parse("s042.mp4").is_none());
    assert!(SegmentName::parse("final.mp4").is_none());
    assert!(SegmentName::parse("042.mkv").is_none());
    assert!(SegmentName::parse("042.mp4.part").is_none());
}

#[test]
fn test_segment_name_orders_by_index() {
    let mut names = vec![
        SegmentName::parse("010.mp4").unwrap(),
        SegmentName::parse("002.mp4").unwrap(),
        SegmentName::parse("001.mp4").unwrap(),
    ];
    names.sort();
    let sorted: Vec<u32> = names.iter().map(SegmentName::index).collect();
    assert_eq!(sorted, vec![1, 2, 10]);
}

#[test]
fn test_segment_temporary_names() {
    let name = SegmentName::new(5, 3);
    assert_eq!(name.temporary(REDACT_PREFIX), "h005.mp4");
    assert_eq!(name.temporary(NORMALIZE_PREFIX), "s005.mp4");
}

#[test]
fn test_untouched_set_from_clipboard_text() {
    let set = UntouchedSet::from_text("003.mp4\n007.mp4\nnot-a-match.txt\n");
    assert_eq!(set, UntouchedSet::from_names(["003.mp4", "007.mp4"]));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_untouched_set_ignores_order_and_duplicates() {
    let set = UntouchedSet::from_text("file:///tmp/work/007.mp4 003.mp4 007.mp4");
    let names: Vec<&str> = set.iter().collect();
    assert_eq!(names, vec!["003.mp4", "007.mp4"]);
}

#[test]
fn test_manifest_renders_in_index_order() {
    let manifest = Manifest::new(vec![
        SegmentName::parse("003.mp4").unwrap(),
        SegmentName::parse("001.mp4").unwrap(),
        SegmentName::parse("002.mp4").unwrap(),
    ]);
    assert_eq!(
        manifest.render(),
        "file '001.mp4'\nfile '002.mp4'\nfile '003.mp4'\n"
    );
}

#[test]
fn test_normalize_settings_default() {
    let settings = NormalizeSettings::default();
    assert_eq!(settings.quality, 0);
    assert_eq!(settings.max_muxing_queue_size, 1024);
}

#[test]
fn test_outcome_exit_codes() {
    let completed = PipelineOutcome::Completed {
        output: PathBuf::from("final.mp4"),
        segments: 3,
        redacted: 2,
        synthesized: 0,
    };
    assert_eq!(completed.exit_code(), EXIT_SUCCESS);
    assert_eq!(PipelineOutcome::Aborted.exit_code(), EXIT_OPERATOR_QUIT);
    assert_ne!(EXIT_OPERATOR_QUIT, EXIT_FAILURE);
}
