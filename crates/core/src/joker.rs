use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every joker name the calculator knows. Names outside this list still
/// score their flat stats.
pub const JOKERS: &[&str] = &[
    "Joker",
    "Greedy Joker",
    "Lusty Joker",
    "Wrathful Joker",
    "Gluttonous Joker",
    "Jolly Joker",
    "Zany Joker",
    "Mad Joker",
    "Crazy Joker",
    "Droll Joker",
    "Sly Joker",
    "Wily Joker",
    "Clever Joker",
    "Devious Joker",
    "Crafty Joker",
    "Half Joker",
    "Scary Face",
    "Smiley Joker",
    "Even Steven",
    "Odd Todd",
    "Scholar",
    "Walkie Talkie",
    "Supernova",
    "Ride The Bus",
    "Green Joker",
    "Runner",
    "Ice Cream",
    "Square Joker",
    "Obelisk",
    "Photograph",
    "Pareidolia",
    "Splash",
    "Cavendish",
    "Gros Michel",
    "Blackboard",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    #[serde(rename = "Green Joker")]
    GreenJoker,
    #[serde(rename = "Ride The Bus")]
    RideTheBus,
    #[serde(rename = "Obelisk")]
    Obelisk,
    #[serde(rename = "Square Joker")]
    SquareJoker,
    #[serde(rename = "Ice Cream")]
    IceCream,
    #[serde(rename = "Runner")]
    Runner,
}

impl CounterKind {
    pub const ALL: [CounterKind; 6] = [
        CounterKind::GreenJoker,
        CounterKind::RideTheBus,
        CounterKind::Obelisk,
        CounterKind::SquareJoker,
        CounterKind::IceCream,
        CounterKind::Runner,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CounterKind::GreenJoker => "Green Joker",
            CounterKind::RideTheBus => "Ride The Bus",
            CounterKind::Obelisk => "Obelisk",
            CounterKind::SquareJoker => "Square Joker",
            CounterKind::IceCream => "Ice Cream",
            CounterKind::Runner => "Runner",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        CounterKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn initial_counter(self) -> i64 {
        match self {
            // x0.2 per step, so 5 steps start the joker at x1.0.
            CounterKind::Obelisk => 5,
            CounterKind::IceCream => 20,
            _ => 0,
        }
    }

    /// Chips granted per counter step, for the chip-scaling counters.
    pub fn chips_per_step(self) -> Option<i64> {
        match self {
            CounterKind::IceCream => Some(5),
            CounterKind::SquareJoker => Some(4),
            CounterKind::Runner => Some(15),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterJoker {
    pub name: CounterKind,
    pub counter: i64,
}

impl CounterJoker {
    pub fn new(name: CounterKind) -> Self {
        Self {
            name,
            counter: name.initial_counter(),
        }
    }
}

impl fmt::Display for CounterJoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            CounterKind::Obelisk => write!(f, "x{:.1} mult", 0.2 * self.counter as f64),
            CounterKind::GreenJoker | CounterKind::RideTheBus => {
                write!(f, "+{} mult", self.counter)
            }
            CounterKind::IceCream | CounterKind::SquareJoker | CounterKind::Runner => {
                let step = self.name.chips_per_step().unwrap_or(0);
                write!(f, "+{} chips", step * self.counter)
            }
        }
    }
}

pub fn display_counter(joker: &CounterJoker) -> String {
    joker.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JokerVariant {
    Simple {
        #[serde(default)]
        name: Option<String>,
    },
    Counter(CounterJoker),
    Photograph {
        #[serde(default)]
        photograph: bool,
    },
}

impl JokerVariant {
    pub fn name(&self) -> Option<&str> {
        match self {
            JokerVariant::Simple { name } => name.as_deref(),
            JokerVariant::Counter(counter) => Some(counter.name.name()),
            JokerVariant::Photograph { .. } => Some("Photograph"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joker {
    pub id: String,
    #[serde(default)]
    pub chips: i64,
    #[serde(default)]
    pub mult: i64,
    #[serde(default = "default_xmult")]
    pub xmult: f64,
    pub vars: JokerVariant,
}

fn default_xmult() -> f64 {
    1.0
}

impl Joker {
    pub fn name(&self) -> Option<&str> {
        self.vars.name()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name() == Some(name)
    }
}

pub fn new_joker(name: Option<&str>) -> Joker {
    let vars = match name {
        None => JokerVariant::Simple { name: None },
        Some("Photograph") => JokerVariant::Photograph { photograph: false },
        Some(name) => match CounterKind::from_name(name) {
            Some(kind) => JokerVariant::Counter(CounterJoker::new(kind)),
            None => JokerVariant::Simple {
                name: Some(name.to_string()),
            },
        },
    };
    Joker {
        id: format!("{:016x}", rand::thread_rng().gen::<u64>()),
        chips: 0,
        mult: 0,
        xmult: 1.0,
        vars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_counter_bonuses() {
        let obelisk = CounterJoker {
            name: CounterKind::Obelisk,
            counter: 5,
        };
        assert_eq!(display_counter(&obelisk), "x1.0 mult");
        let green = CounterJoker {
            name: CounterKind::GreenJoker,
            counter: 10,
        };
        assert_eq!(display_counter(&green), "+10 mult");
        let runner = CounterJoker {
            name: CounterKind::Runner,
            counter: 3,
        };
        assert_eq!(display_counter(&runner), "+45 chips");
        let ice = CounterJoker::new(CounterKind::IceCream);
        assert_eq!(display_counter(&ice), "+100 chips");
    }

    #[test]
    fn factory_picks_variant_by_name() {
        assert_eq!(new_joker(None).vars, JokerVariant::Simple { name: None });
        assert_eq!(
            new_joker(Some("Photograph")).vars,
            JokerVariant::Photograph { photograph: false }
        );
        assert_eq!(
            new_joker(Some("Square Joker")).vars,
            JokerVariant::Counter(CounterJoker {
                name: CounterKind::SquareJoker,
                counter: 0
            })
        );
        let scholar = new_joker(Some("Scholar"));
        assert!(scholar.is_named("Scholar"));
        assert_eq!(scholar.xmult, 1.0);
    }

    #[test]
    fn factory_ids_are_distinct() {
        assert_ne!(new_joker(None).id, new_joker(None).id);
    }

    #[test]
    fn every_counter_kind_is_listed() {
        for kind in CounterKind::ALL {
            assert!(JOKERS.contains(&kind.name()));
        }
        assert!(JOKERS.contains(&"Photograph"));
    }

    #[test]
    fn variants_use_kind_tags() {
        let json = serde_json::to_value(&JokerVariant::Counter(CounterJoker::new(
            CounterKind::Obelisk,
        )))
        .unwrap();
        assert_eq!(json["kind"], "counter");
        assert_eq!(json["name"], "Obelisk");
        assert_eq!(json["counter"], 5);
        let joker: Joker =
            serde_json::from_str(r#"{"id":"a","vars":{"kind":"simple","name":"Splash"}}"#)
                .unwrap();
        assert!(joker.is_named("Splash"));
        assert_eq!(joker.xmult, 1.0);
    }
}
