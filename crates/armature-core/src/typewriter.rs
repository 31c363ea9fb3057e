//! Type-and-erase cycling through the headline roles.

use std::time::Duration;

use crate::config::TypewriterConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterStep {
    pub text: String,
    /// Delay before the next step should run.
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    config: TypewriterConfig,
    role: usize,
    chars: usize,
    deleting: bool,
}

impl Typewriter {
    pub fn new(config: TypewriterConfig) -> Self {
        Self {
            config,
            role: 0,
            chars: 0,
            deleting: false,
        }
    }

    /// Delay before the very first step.
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.config.start_delay_ms)
    }

    pub fn role_index(&self) -> usize {
        self.role
    }

    /// Types or erases one character.
    pub fn step(&mut self) -> TypewriterStep {
        let Some(role) = self.config.roles.get(self.role) else {
            return TypewriterStep {
                text: String::new(),
                delay: Duration::from_millis(self.config.hold_ms),
            };
        };
        let length = role.chars().count();

        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
        } else {
            self.chars = (self.chars + 1).min(length);
        }
        let text: String = role.chars().take(self.chars).collect();

        let mut delay_ms = if self.deleting {
            self.config.delete_ms
        } else {
            self.config.type_ms
        };
        if !self.deleting && self.chars == length {
            delay_ms = self.config.hold_ms;
            self.deleting = true;
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.role = (self.role + 1) % self.config.roles.len();
            delay_ms = self.config.next_role_ms;
        }

        TypewriterStep {
            text,
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> Typewriter {
        Typewriter::new(TypewriterConfig {
            roles: vec!["AB".into(), "Ç".into()],
            ..TypewriterConfig::default()
        })
    }

    #[test]
    fn types_holds_erases_and_moves_on() {
        let mut typewriter = short();
        let steps: Vec<(String, u64)> = (0..6)
            .map(|_| {
                let step = typewriter.step();
                (step.text, step.delay.as_millis() as u64)
            })
            .collect();
        assert_eq!(
            steps,
            vec![
                ("A".into(), 100),
                ("AB".into(), 2000),
                ("A".into(), 40),
                ("".into(), 500),
                ("Ç".into(), 2000),
                ("".into(), 500),
            ]
        );
        assert_eq!(typewriter.role_index(), 0);
    }

    #[test]
    fn default_roles_start_after_a_second() {
        let mut typewriter = Typewriter::new(TypewriterConfig::default());
        assert_eq!(typewriter.start_delay(), Duration::from_millis(1000));
        assert_eq!(typewriter.step().text, "M");
    }

    #[test]
    fn empty_role_list_is_inert() {
        let mut typewriter = Typewriter::new(TypewriterConfig {
            roles: Vec::new(),
            ..TypewriterConfig::default()
        });
        assert_eq!(typewriter.step().text, "");
    }
}
