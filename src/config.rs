use crate::error::SimulationError;
use crate::global_variables::DEFAULT_CROSSING_TIME;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::time::Duration;

/// One group of vehicles released onto the bridge together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub vehicles: usize,
    /// Chance, in percent, that a vehicle heads north (`Forward`).
    pub forward_probability: u8,
    /// Pause after the group has fully drained.
    pub delay_secs: u64,
}

impl GroupConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

fn default_crossing_time_ms() -> u64 {
    DEFAULT_CROSSING_TIME.as_millis() as u64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub groups: Vec<GroupConfig>,
    #[serde(default = "default_crossing_time_ms")]
    pub crossing_time_ms: u64,
    /// Seed for vehicle generation; `None` draws from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(groups: Vec<GroupConfig>) -> Self {
        Self {
            groups,
            crossing_time_ms: default_crossing_time_ms(),
            seed: None,
        }
    }

    pub fn crossing_time(&self) -> Duration {
        Duration::from_millis(self.crossing_time_ms)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        for (i, group) in self.groups.iter().enumerate() {
            if group.forward_probability > 100 {
                return Err(SimulationError::InvalidGroup {
                    index: i + 1,
                    reason: format!(
                        "north probability {} is above 100",
                        group.forward_probability
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, SimulationError> {
        let config: SimulationConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SimulationError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Asks for the groups one value at a time on the console. Values may be
    /// separated by any whitespace.
    pub fn prompt<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<Self, SimulationError> {
        let mut tokens = Tokens::new(input);

        writeln!(output, "Enter # of groups: ")?;
        let count: usize = tokens.next_value("group count")?;

        let mut groups = Vec::with_capacity(count);
        for _ in 0..count {
            writeln!(output, "Enter quantity of vehicles: ")?;
            let vehicles = tokens.next_value("vehicle quantity")?;
            writeln!(output, "Enter North probability <=100: ")?;
            let forward_probability = tokens.next_value("north probability")?;
            writeln!(output, "Enter delay in seconds: ")?;
            let delay_secs = tokens.next_value("delay")?;
            groups.push(GroupConfig {
                vehicles,
                forward_probability,
                delay_secs,
            });
        }

        let config = Self::new(groups);
        config.validate()?;
        Ok(config)
    }
}

/// Whitespace separated values pulled lazily from a line reader.
struct Tokens<R> {
    input: R,
    pending: Vec<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: Vec::new(),
        }
    }

    fn next_value<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, SimulationError> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SimulationError::InvalidInput(format!(
                    "input ended before {} was given",
                    what
                )));
            }
            self.pending = line.split_whitespace().rev().map(str::to_owned).collect();
        }
        let token = self.pending.pop().unwrap_or_default();
        token
            .parse()
            .map_err(|_| SimulationError::InvalidInput(format!("{:?} is not a valid {}", token, what)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_reads_each_group() {
        let input = Cursor::new("2\n5\n50\n1\n3 100\n0\n");
        let mut output = Vec::new();

        let config = SimulationConfig::prompt(input, &mut output).unwrap();
        assert_eq!(
            config.groups,
            vec![
                GroupConfig {
                    vehicles: 5,
                    forward_probability: 50,
                    delay_secs: 1
                },
                GroupConfig {
                    vehicles: 3,
                    forward_probability: 100,
                    delay_secs: 0
                },
            ]
        );
        assert_eq!(config.crossing_time(), DEFAULT_CROSSING_TIME);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.starts_with("Enter # of groups:"));
        assert_eq!(transcript.matches("Enter delay in seconds:").count(), 2);
    }

    #[test]
    fn prompt_rejects_probability_over_100() {
        let input = Cursor::new("1 4 101 0");
        let err = SimulationConfig::prompt(input, &mut std::io::sink()).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidGroup { index: 1, .. }));
    }

    #[test]
    fn prompt_reports_truncated_input() {
        let input = Cursor::new("1\n4\n");
        let err = SimulationConfig::prompt(input, &mut std::io::sink()).unwrap_err();
        assert_eq!(err.as_label(), "invalid_input");
    }

    #[test]
    fn prompt_rejects_non_numbers() {
        let err = SimulationConfig::prompt(Cursor::new("many"), &mut std::io::sink()).unwrap_err();
        assert!(err.to_string().contains("\"many\" is not a valid group count"));
    }

    #[test]
    fn json_fills_defaults() {
        let json = r#"{ "groups": [ { "vehicles": 10, "forward_probability": 30, "delay_secs": 2 } ] }"#;
        let config = SimulationConfig::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.crossing_time_ms, 3000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn json_validates_groups() {
        let json = r#"{ "groups": [ { "vehicles": 1, "forward_probability": 0, "delay_secs": 0 },
                                    { "vehicles": 1, "forward_probability": 200, "delay_secs": 0 } ] }"#;
        let err = SimulationConfig::from_json_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidGroup { index: 2, .. }));
    }
}
