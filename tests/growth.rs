//! Buffer sizing: seed heuristics, growth retries, exact measurement, and
//! the capacity-minus-one boundary.

use rstest::rstest;

use printf_buf::{fmt_args, BoundedRetry, MeasureRender, PrintfBuf, START_BUF_SIZE};

#[rstest]
fn short_render_needs_no_growth() {
    let mut buf = PrintfBuf::with_strategy(BoundedRetry);
    buf.print("%s scored %d points", &fmt_args!["Alice", 42]);
    assert_eq!(buf.buffer().capacity(), START_BUF_SIZE);
}

#[rstest]
fn long_literal_plus_long_substitution() {
    // A 2000-byte literal around one 3000-byte substitution: the seed covers
    // the literal and then some, but the result forces at least one retry.
    let literal = "L".repeat(2000);
    let fmt = format!("{literal}%s");
    let substitution = "S".repeat(3000);
    let args = fmt_args![substitution.as_str()];
    let expected = format!("{literal}{substitution}");

    let mut bounded = PrintfBuf::with_strategy(BoundedRetry);
    let rendered = bounded.print(&fmt, &args).to_owned();
    assert_eq!(rendered.len(), 5000);
    assert_eq!(rendered, expected);
    // Seeded to 3004 (2002 * 1.5 + 1), then doubled once.
    assert_eq!(bounded.buffer().capacity(), 6008);

    let mut two_pass = PrintfBuf::with_strategy(MeasureRender::new());
    assert_eq!(two_pass.print(&fmt, &args), expected);
    // The measuring pass sizes the buffer exactly.
    assert_eq!(two_pass.buffer().capacity(), 5001);
}

#[rstest]
fn growth_by_an_order_of_magnitude() {
    let huge = "z".repeat(START_BUF_SIZE * 10);
    let args = fmt_args![huge.as_str()];

    let mut bounded = PrintfBuf::with_strategy(BoundedRetry);
    assert_eq!(bounded.print("%s", &args), huge);

    let mut two_pass = PrintfBuf::with_strategy(MeasureRender::new());
    assert_eq!(two_pass.print("%s", &args), huge);
}

#[rstest]
fn fit_at_capacity_minus_one_is_not_truncation() {
    let mut buf = PrintfBuf::with_strategy(BoundedRetry).with_start_capacity(8);
    let rendered = buf.print("%s", &fmt_args!["1234567"]);
    assert_eq!(rendered, "1234567");
    assert_eq!(
        buf.buffer().capacity(),
        8,
        "seven bytes plus the terminator fill eight exactly; no retry"
    );
}

#[rstest]
fn doubling_walks_up_from_a_tiny_seed() {
    let mut buf = PrintfBuf::with_strategy(BoundedRetry).with_start_capacity(2);
    let rendered = buf.print("%s", &fmt_args!["abcdefghij"]);
    assert_eq!(rendered, "abcdefghij");
    // The seed estimate raises 2 to 4, then doubling gives 8 and 16.
    assert_eq!(buf.buffer().capacity(), 16);
}

#[rstest]
fn reuse_across_mixed_sizes_leaks_nothing() {
    let mut buf = PrintfBuf::with_strategy(BoundedRetry);
    let long = "a".repeat(4000);
    assert_eq!(buf.print("%s", &fmt_args![long.as_str()]), long);
    // A shorter render afterwards must not expose stale bytes.
    assert_eq!(buf.print("%s", &fmt_args!["tiny"]), "tiny");
    assert_eq!(buf.buffer().len(), 4);
}
