/// Prints `label: message` with the label styled when the stream supports color.
#[doc(hidden)]
#[macro_export]
macro_rules! log_line {
    ($print:ident, $stream:ident, $label:expr, $style:expr, $($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            $print!(
                "{}: {}",
                $label.if_supports_color(owo_colors::Stream::$stream, |s| s.style($style)),
                format_args!($($arg)+)
            );
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log_line!(eprintln, Stderr, "error", owo_colors::Style::new().bold().red(), $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log_line!(println, Stdout, "warning", owo_colors::Style::new().bold().yellow(), $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log_line!(println, Stdout, "info", owo_colors::Style::new().bold().green(), $($arg)+)
    };
}

/// Step completed. Printed with a check mark instead of a label.
#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            println!(
                "{} {}",
                "✔".if_supports_color(owo_colors::Stream::Stdout, |s| s
                    .style(owo_colors::Style::new().bold().green())),
                format_args!($($arg)+)
            );
        }
    };
}

/// Only printed when `PYSEED_TRACE` is set.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        if std::env::var_os("PYSEED_TRACE").is_some() {
            $crate::log_line!(println, Stdout, "trace", owo_colors::Style::new().bold(), $($arg)+)
        }
    };
}
