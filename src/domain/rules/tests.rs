// Unit tests for business rules

use super::*;

const SHOWINFO_SAMPLE: &str = "\
[Parsed_showinfo_1 @ 0x55d0c8a3c0c0] config in time_base: 1/12800, frame_rate: 25/1
[Parsed_showinfo_1 @ 0x55d0c8a3c0c0] n:   0 pts:  38400 pts_time:3       duration:    512 duration_time:0.04    fmt:yuv420p
[Parsed_showinfo_1 @ 0x55d0c8a3c0c0] n:   1 pts:  83200 pts_time:6.5     duration:    512 duration_time:0.04    fmt:yuv420p
frame=    2 fps=0.0 q=-0.0 Lsize=N/A time=00:00:09.96 bitrate=N/A speed= 151x
";

#[test]
fn test_parse_scene_timestamps() {
    assert_eq!(parse_scene_timestamps(SHOWINFO_SAMPLE), vec![3.0, 6.5]);
}

#[test]
fn test_parse_scene_timestamps_empty() {
    assert!(parse_scene_timestamps("").is_empty());
    assert!(parse_scene_timestamps("frame=  250 fps=0.0 q=-0.0 size=N/A").is_empty());
}

#[test]
fn test_extract_segment_names() {
    let names = extract_segment_names("003.mp4\n007.mp4\nnot-a-match.txt");
    let expected: BTreeSet<String> = ["003.mp4", "007.mp4"].iter().map(|s| s.to_string()).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_extract_segment_names_from_uri_list() {
    let clipboard = "x-special/nautilus-clipboard\ncopy\nfile:///home/me/cut/012.mp4\nfile:///home/me/cut/004.mp4\n";
    let names = extract_segment_names(clipboard);
    assert!(names.contains("012.mp4"));
    assert!(names.contains("004.mp4"));
    assert_eq!(names.len(), 2);
}

#[test]
fn test_is_segment_file_name() {
    assert!(is_segment_file_name("001.mp4"));
    assert!(is_segment_file_name("1234.mp4"));
    assert!(!is_segment_file_name("h001.mp4"));
    assert!(!is_segment_file_name("concat_file.txt"));
    assert!(!is_segment_file_name(".mp4"));
}

#[test]
fn test_select_segments_sorts_regardless_of_listing_order() {
    let listing = vec!["010.mp4", "mask.png", "002.mp4", "s001.mp4", "001.mp4", "final.mp4"];
    let segments = select_segments(listing);
    let names: Vec<&str> = segments.iter().map(|s| s.file_name()).collect();
    assert_eq!(names, vec!["001.mp4", "002.mp4", "010.mp4"]);
}

#[test]
fn test_partition_targets() {
    let segments = select_segments(["001.mp4", "002.mp4", "003.mp4", "004.mp4", "005.mp4"]);
    let untouched = UntouchedSet::from_names(["002.mp4"]);

    let (targets, skipped) = partition_targets(&segments, &untouched);
    let target_names: Vec<&str> = targets.iter().map(|s| s.file_name()).collect();

    assert_eq!(target_names, vec!["001.mp4", "003.mp4", "004.mp4", "005.mp4"]);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].file_name(), "002.mp4");
}

#[test]
fn test_unmatched_untouched() {
    let segments = select_segments(["001.mp4", "002.mp4"]);
    let untouched = UntouchedSet::from_names(["002.mp4", "009.mp4"]);
    assert_eq!(unmatched_untouched(&segments, &untouched), vec!["009.mp4"]);
}

#[test]
fn test_is_plain_file_name() {
    assert!(is_plain_file_name("mask.png"));
    assert!(!is_plain_file_name(""));
    assert!(!is_plain_file_name(".."));
    assert!(!is_plain_file_name("out/final.mp4"));
}
