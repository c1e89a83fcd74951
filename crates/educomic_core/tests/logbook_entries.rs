use educomic_core::LogBook;

#[test]
fn append_assigns_monotonic_sequences_from_one() {
    let mut book = LogBook::new();
    assert_eq!(book.append("first"), 1);
    assert_eq!(book.append("second"), 2);
    assert_eq!(book.append("third"), 3);

    let collected: Vec<_> = book
        .entries()
        .map(|e| (e.sequence, e.message.clone()))
        .collect();
    assert_eq!(
        collected,
        vec![
            (1, "first".to_string()),
            (2, "second".to_string()),
            (3, "third".to_string()),
        ]
    );
}

#[test]
fn entries_can_be_iterated_repeatedly() {
    let mut book = LogBook::new();
    book.append("one");
    book.append("two");

    let first_pass: Vec<_> = book.entries().map(|e| e.sequence).collect();
    let second_pass: Vec<_> = book.entries().map(|e| e.sequence).collect();
    assert_eq!(first_pass, second_pass);
    assert_eq!(first_pass, vec![1, 2]);
}

#[test]
fn reset_clears_entries_and_restarts_numbering() {
    let mut book = LogBook::new();
    book.append("old line");
    book.append("older line");

    book.reset();
    assert!(book.is_empty());
    assert_eq!(book.len(), 0);

    assert_eq!(book.append("fresh"), 1);
    assert_eq!(book.last().unwrap().sequence, 1);
    assert_eq!(book.last().unwrap().message, "fresh");
}
