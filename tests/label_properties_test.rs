//! Property-style checks of the hint-label generator.

use keyhint::geom::Point;
use keyhint::labels::{assign, generate, Alphabet, LabelOrder};

fn alphabet(s: &str) -> Alphabet {
    Alphabet::new(s).expect("valid alphabet")
}

fn assert_valid_code(labels: &[String], alphabet: &Alphabet) {
    for label in labels {
        assert!(!label.is_empty(), "empty label");
        for c in label.chars() {
            assert!(
                alphabet.chars().contains(&c),
                "label {:?} uses {:?} outside the alphabet",
                label,
                c
            );
        }
    }
    for (i, a) in labels.iter().enumerate() {
        for (j, b) in labels.iter().enumerate() {
            if i == j {
                continue;
            }
            assert_ne!(a, b, "duplicate label {:?}", a);
            assert!(
                !b.starts_with(a.as_str()),
                "label {:?} is a prefix of {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_generator_properties_across_sizes_and_alphabets() {
    for alpha in ["as", "asd", "asdfghjkl"] {
        let alphabet = alphabet(alpha);
        for n in 0..=120 {
            let labels = generate(n, &alphabet);
            assert_eq!(labels.len(), n, "n={} alphabet={}", n, alpha);
            assert_valid_code(&labels, &alphabet);
        }
    }
}

#[test]
fn test_label_length_is_logarithmic() {
    let alphabet = alphabet("asdfghjkl");
    for (n, expected_max) in [(9, 1), (100, 3), (1000, 4), (5000, 5)] {
        let labels = generate(n, &alphabet);
        let max_len = labels.iter().map(String::len).max().unwrap_or(0);
        // The right-leaning expansion adds at most one level of slack over
        // a perfectly balanced code.
        assert!(
            max_len <= expected_max + 1,
            "n={} produced max label length {}",
            n,
            max_len
        );
    }
}

#[test]
fn test_canonical_two_symbol_scenario() {
    let labels = generate(3, &alphabet("AS"));
    assert_eq!(labels, vec!["a", "sa", "ss"]);
}

#[test]
fn test_reading_order_prefers_top_left() {
    let alphabet = alphabet("as");
    let anchors = [
        Point::new(300.0, 300.0),
        Point::new(10.0, 10.0),
        Point::new(200.0, 10.0),
    ];
    let labels = assign(&anchors, &alphabet, LabelOrder::ReadingOrder);

    assert_eq!(labels[1], "a", "top-left anchor gets the shortest label");
    assert_eq!(labels[2], "sa");
    assert_eq!(labels[0], "ss", "bottom-most anchor gets the longest label");
}

#[test]
fn test_reading_order_label_lengths_follow_scan_position() {
    let alphabet = alphabet("as");
    // A single column: reading order is just top-to-bottom, so label
    // lengths must be non-decreasing down the page.
    let anchors: Vec<Point> = (0..11).map(|i| Point::new(10.0, i as f64 * 30.0)).collect();
    let labels = assign(&anchors, &alphabet, LabelOrder::ReadingOrder);

    for pair in labels.windows(2) {
        assert!(
            pair[0].len() <= pair[1].len(),
            "labels grow down the page: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_assignment_is_a_permutation_of_generated_labels() {
    let alphabet = alphabet("asd");
    let anchors: Vec<Point> = (0..17)
        .map(|i| Point::new((i * 37 % 11) as f64, (i * 13 % 7) as f64))
        .collect();

    let mut assigned = assign(&anchors, &alphabet, LabelOrder::ReadingOrder);
    let mut generated = generate(anchors.len(), &alphabet);
    assigned.sort();
    generated.sort();
    assert_eq!(assigned, generated);
}
