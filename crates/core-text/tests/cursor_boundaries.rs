use core_text::{MAX_QUERY_BYTES, QueryBuffer};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(String),
    Left,
    Right,
    Backspace,
    Delete,
    Word,
    Home,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-c é漢😀]{0,3}".prop_map(Op::Insert),
        Just(Op::Left),
        Just(Op::Right),
        Just(Op::Backspace),
        Just(Op::Delete),
        Just(Op::Word),
        Just(Op::Home),
    ]
}

proptest! {
    #[test]
    fn cursor_always_on_char_boundary(ops in proptest::collection::vec(op(), 0..64)) {
        let mut b = QueryBuffer::new();
        for op in ops {
            match op {
                Op::Insert(s) => { b.insert(&s); }
                Op::Left => { b.move_left(); }
                Op::Right => { b.move_right(); }
                Op::Backspace => { b.delete_rune_before(); }
                Op::Delete => { b.delete_rune_at(); }
                Op::Word => { b.delete_word_back(); }
                Op::Home => b.cursor_to_start(),
            }
            prop_assert!(b.as_str().is_char_boundary(b.cursor()));
            prop_assert!(b.cursor() <= b.len());
            prop_assert!(b.len() <= MAX_QUERY_BYTES);
        }
    }

    #[test]
    fn left_then_right_returns_to_same_stop(s in "[a-z é漢😀]{1,12}") {
        let mut b = QueryBuffer::new();
        b.insert(&s);
        let end = b.cursor();
        prop_assert!(b.move_left());
        prop_assert!(b.move_right());
        prop_assert_eq!(b.cursor(), end);
    }
}

#[test]
fn word_delete_after_multibyte_word() {
    let mut b = QueryBuffer::new();
    b.insert("café crème");
    assert!(b.delete_word_back());
    assert_eq!(b.as_str(), "café ");
    assert!(b.delete_word_back());
    assert_eq!(b.as_str(), "");
}
