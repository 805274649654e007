//! Pre-filtering of raw argv down to the known flag set.
//!
//! Callers may pass extra hyperparameters the tool does not understand;
//! those are silently dropped, and known flags keep their effect no matter
//! where they appear relative to an unknown one. The surviving arguments
//! are then parsed strictly by clap.

/// Flags the `canopy` command understands. Each one takes a value.
const KNOWN_VALUE_FLAGS: &[&str] = &[
    "--n_estimators",
    "--random_state",
    "--model-dir",
    "--train",
    "--test",
    "--train-file",
    "--test-file",
];

/// Known flags that take no value.
const KNOWN_BARE_FLAGS: &[&str] = &["--help", "-h", "--version", "-V"];

/// Keep the binary name and every known flag with its value; drop unknown
/// flags together with their detached value, if any.
pub fn filter_known_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();
    let mut kept = Vec::new();

    if let Some(bin) = args.next() {
        kept.push(bin);
    }

    while let Some(arg) = args.next() {
        let has_inline_value = arg.contains('=');
        let name = if has_inline_value {
            arg.split('=').next().unwrap_or("")
        } else {
            arg.as_str()
        };
        let is_bare = KNOWN_BARE_FLAGS.contains(&name);
        let is_value_flag = KNOWN_VALUE_FLAGS.contains(&name);
        let is_flag_like = name.starts_with('-');

        if is_bare {
            kept.push(arg);
        } else if is_value_flag {
            kept.push(arg);
            if !has_inline_value {
                // The value belongs to this flag even when it starts with a
                // hyphen, e.g. a negative hyperparameter.
                if let Some(value) = args.next() {
                    kept.push(value);
                }
            }
        } else if is_flag_like && !has_inline_value {
            // Unknown flag: drop it and its detached value.
            let _ = args.next_if(|next| !next.starts_with('-'));
        }
        // Anything else is a stray positional token; dropped.
    }

    kept
}
