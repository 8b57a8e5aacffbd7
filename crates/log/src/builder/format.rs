//! Format layer creation macros

/// Applies the shared display toggles to a fmt layer and boxes it.
///
/// Timestamps change the layer's type, so both branches are boxed.
macro_rules! boxed_fmt_layer {
    ($layer:expr, $display:expr) => {{
        let layer = $layer
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source);

        if $display.time {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    }};
}
