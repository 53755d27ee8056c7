use pagewarm::{AdviseConfig, MemRange, full_ranges, next_range, round_page_size, to_ranges};

const PAGE: u64 = 4096;

#[test]
fn gap_stop_then_second_run_splits_at_cap() {
    let presence = [false, false, true, true, true, false, true, true, true, true];
    let config = AdviseConfig::new(PAGE, 3 * PAGE).unwrap();

    assert_eq!(
        config.to_ranges(&presence),
        vec![
            MemRange::new(8192, 12288),
            MemRange::new(24576, 12288),
            MemRange::new(36864, 4096),
        ]
    );

    let wider = AdviseConfig::new(PAGE, 4 * PAGE).unwrap();
    assert_eq!(
        wider.to_ranges(&presence),
        vec![MemRange::new(8192, 12288), MemRange::new(24576, 16384)]
    );
}

#[test]
fn long_run_is_split_at_the_cap() {
    let ranges = to_ranges(&[true; 6], PAGE, 2 * PAGE);
    let offsets: Vec<u64> = ranges.iter().map(|r| r.offset).collect();

    assert_eq!(offsets, vec![0, 8192, 16384]);
    assert!(ranges.iter().all(|r| r.length == 8192));
    assert!(ranges.windows(2).all(|w| w[0].end() == w[1].offset));
}

#[test]
fn driver_matches_repeated_primitive_calls() {
    let presence = [true, true, true, false, false, true, true, false, true];
    let cap = 2 * PAGE;

    let mut manual = Vec::new();
    let mut rest: &[bool] = &presence;
    let mut base = 0;
    while let Some((range, remainder)) = next_range(rest, base, PAGE, cap) {
        manual.push(range);
        base = range.end();
        rest = remainder;
        if rest.is_empty() {
            break;
        }
    }

    assert_eq!(manual, to_ranges(&presence, PAGE, cap));
    assert_eq!(manual.len(), 4);
}

#[test]
fn whole_file_partition_and_rounding_agree() {
    let file_size = 3 * PAGE + 10;
    let ranges = full_ranges(file_size, 2 * PAGE);

    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges.last().unwrap().end(), file_size);

    let rounded = round_page_size(file_size, PAGE);
    assert_eq!(rounded, 4 * PAGE);
    let presence = vec![true; (rounded / PAGE) as usize];
    let covered: u64 = to_ranges(&presence, PAGE, 2 * PAGE).iter().map(|r| r.length).sum();
    assert_eq!(covered, rounded);
}
