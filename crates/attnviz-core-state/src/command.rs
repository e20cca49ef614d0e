use anyhow::{Result, bail};
use attnviz_core_kernel::Token;
use std::str::FromStr;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BiasSwitch {
    On,
    Off,
    Toggle,
}

/// One line of the interactive language.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// Raw text is kept as typed; parsing is permissive and happens on apply.
    Set { token: Token, raw: String },
    Bias(BiasSwitch),
    Shuffle,
    Reset,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  set <A|B|C> <value>   set a token value (also: A=5)
  bias on|off|toggle    positional bias (bias = 0.1i * 0.1j)
  shuffle               shuffle the token order
  reset                 back to A=1 B=2 C=3 and bias off, order is kept
  show                  draw the matrix again
  help                  this text
  quit                  leave";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();

        // A=5 shorthand
        if let Some((lhs, rhs)) = line.split_once('=') {
            let token = lhs.parse::<Token>()?;
            return Ok(Command::Set {
                token,
                raw: rhs.trim().to_string(),
            });
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None => (line, ""),
        };

        let cmd = match head.to_ascii_lowercase().as_str() {
            "set" => {
                let (tok, raw) = match rest.split_once(char::is_whitespace) {
                    Some((t, r)) => (t, r.trim()),
                    None => (rest, ""),
                };
                if tok.is_empty() {
                    bail!("usage: set <A|B|C> <value>");
                }
                Command::Set {
                    token: tok.parse()?,
                    raw: raw.to_string(),
                }
            }
            "bias" => match rest.to_ascii_lowercase().as_str() {
                "on" | "true" | "1" => Command::Bias(BiasSwitch::On),
                "off" | "false" | "0" => Command::Bias(BiasSwitch::Off),
                "" | "toggle" => Command::Bias(BiasSwitch::Toggle),
                other => bail!("bias: expected on, off or toggle, got '{}'", other),
            },
            "shuffle" => Command::Shuffle,
            "reset" => Command::Reset,
            "show" | "" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command '{}', try 'help'", other),
        };

        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        assert_eq!(
            "set b 12".parse::<Command>().unwrap(),
            Command::Set {
                token: Token::B,
                raw: "12".into()
            }
        );
        assert_eq!(
            "C = -4".parse::<Command>().unwrap(),
            Command::Set {
                token: Token::C,
                raw: "-4".into()
            }
        );
        // empty value is allowed, it parses to 0 later
        assert_eq!(
            "set A".parse::<Command>().unwrap(),
            Command::Set {
                token: Token::A,
                raw: String::new()
            }
        );
        assert!("set Z 1".parse::<Command>().is_err());
        assert!("set".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_bias() {
        assert_eq!("bias on".parse::<Command>().unwrap(), Command::Bias(BiasSwitch::On));
        assert_eq!("BIAS off".parse::<Command>().unwrap(), Command::Bias(BiasSwitch::Off));
        assert_eq!("bias".parse::<Command>().unwrap(), Command::Bias(BiasSwitch::Toggle));
        assert!("bias maybe".parse::<Command>().is_err());
    }

    #[test]
    fn test_no_direct_order_command() {
        // the order only moves through shuffle
        assert!("order 2,0,1".parse::<Command>().is_err());
        assert!("order".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!("shuffle".parse::<Command>().unwrap(), Command::Shuffle);
        assert_eq!("  ".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
        assert!("dance".parse::<Command>().is_err());
    }
}
