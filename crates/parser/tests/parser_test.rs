// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

use benchsift_parser::{parse_lines, Layout};

#[test]
fn it_parses_the_reference_layout() {
    let lines: Vec<&str> = include_str!("./bench-log.txt").lines().collect();
    assert_eq!(lines.len(), 494);

    let layout = Layout::reference();
    let table = parse_lines(&lines, &layout).unwrap();

    // every section is present, in layout order
    assert_eq!(
        table.names().collect::<Vec<_>>(),
        layout
            .sections()
            .iter()
            .map(|section| section.name.as_ref())
            .collect::<Vec<_>>()
    );

    // each section carries its 35 data rows: headers, the mid-line dash of
    // the warmup note and the blank separator are all excluded
    for (nr, section) in layout.sections().iter().enumerate() {
        let expected: Vec<f64> = (0..35)
            .map(|row| 10.0 + nr as f64 + 0.25 * row as f64)
            .collect();
        assert_eq!(
            table.get(&section.name),
            Some(&expected[..]),
            "section {}",
            section.name
        );
    }

    // spot-check the dpa_t2 slice (lines 38..76): ms rows are normalized
    let dpa_t2 = table.get("dpa_t2").unwrap();
    assert_eq!(dpa_t2.len(), 35);
    assert_eq!(dpa_t2[0], 11.0);
    // row 3 is printed as 11750.000ms
    assert_eq!(dpa_t2[3], 11.75);
    assert_eq!(dpa_t2[34], 19.5);
}

#[test]
fn it_keeps_sections_independent_of_extra_lines() {
    // a file longer than the layout: trailing lines are ignored
    let mut lines: Vec<String> = include_str!("./bench-log.txt")
        .lines()
        .map(str::to_string)
        .collect();
    lines.push("- trailing 99.000".to_string());
    let table = parse_lines(&lines, &Layout::reference()).unwrap();
    assert_eq!(table.sample_count(), 13 * 35);
}
