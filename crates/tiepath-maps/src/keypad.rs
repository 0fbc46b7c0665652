//! Keypads operated through chains of robot-held directional keypads.
//!
//! A robot arm hovers over a key and is steered by someone typing arrows and
//! `A` on a directional keypad. That someone may itself be a robot steered
//! from another directional keypad, and so on up to a human. The cost of
//! pressing a key on layer `k` is therefore a shortest path on layer `k`'s
//! keypad, weighted by the press costs of layer `k - 1`. Tables are built
//! bottom-up, one Dijkstra run per key per layer.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tiepath_core::{Heading, Point};
use tiepath_paths::{Cost, Graph, GraphError, PathFinder, UNREACHABLE};

use crate::tile::MapError;

/// Key that both confirms a press and parks every arm at the start.
pub const ACTIVATE: char = 'A';

/// A keypad layout: a set of keys at grid positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    keys: HashMap<char, Point>,
    at: HashMap<Point, char>,
}

impl Keypad {
    pub const NUMERIC_LAYOUT: &'static str = "789\n456\n123\n 0A";
    pub const DIRECTIONAL_LAYOUT: &'static str = " ^A\n<v>";

    /// Parse a layout where spaces mark gaps the arm must never cross.
    pub fn parse(layout: &str) -> Result<Self, MapError> {
        let mut pad = Self {
            keys: HashMap::new(),
            at: HashMap::new(),
        };
        for (ch, pos) in layout_keys(layout) {
            if pad.keys.insert(ch, pos).is_some() {
                return Err(MapError::InvalidRune { ch, pos });
            }
            pad.at.insert(pos, ch);
        }
        Ok(pad)
    }

    /// The door keypad: digits and `A`.
    pub fn numeric() -> Self {
        Self::from_const(Self::NUMERIC_LAYOUT)
    }

    /// Arrows and `A`.
    pub fn directional() -> Self {
        Self::from_const(Self::DIRECTIONAL_LAYOUT)
    }

    /// Built-in layouts have no duplicate keys.
    fn from_const(layout: &str) -> Self {
        let keys: HashMap<char, Point> = layout_keys(layout).collect();
        let at = keys.iter().map(|(&ch, &pos)| (pos, ch)).collect();
        Self { keys, at }
    }

    #[inline]
    pub fn position(&self, key: char) -> Option<Point> {
        self.keys.get(&key).copied()
    }

    #[inline]
    pub fn key_at(&self, pos: Point) -> Option<char> {
        self.at.get(&pos).copied()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<char> {
        let mut keys: Vec<char> = self.keys.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn layout_keys(layout: &str) -> impl Iterator<Item = (char, Point)> + '_ {
    layout
        .trim_matches('\n')
        .lines()
        .enumerate()
        .flat_map(|(y, line)| {
            line.chars()
                .enumerate()
                .filter(|&(_, ch)| ch != ' ')
                .map(move |(x, ch)| (ch, Point::new(x as i32, y as i32)))
        })
}

/// Cost of moving an arm from one key to another and pressing it.
pub type PressCosts = HashMap<(char, char), Cost>;

/// Search state on one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum KeyState {
    /// Arm over `key`; the controlling arm was last over `ctrl`.
    Hover { key: char, ctrl: char },
    /// `key` has been pressed.
    Pressed(char),
}

/// Press-cost tables for a numeric keypad behind `robots` directional ones.
#[derive(Debug, Clone)]
pub struct KeypadChain {
    /// `layers[0]` is the human's own keypad; the last entry is the numeric
    /// keypad.
    layers: Vec<PressCosts>,
}

impl KeypadChain {
    /// Standard numeric and directional layouts.
    pub fn new(robots: usize) -> Result<Self, KeypadError> {
        Self::with_keypads(&Keypad::numeric(), &Keypad::directional(), robots)
    }

    /// Fails with [`KeypadError::Overflow`] when some press cost on a layer
    /// no longer fits in a [`Cost`].
    pub fn with_keypads(
        numeric: &Keypad,
        directional: &Keypad,
        robots: usize,
    ) -> Result<Self, KeypadError> {
        let dir_keys = directional.keys();
        let human: PressCosts = dir_keys
            .iter()
            .flat_map(|&a| dir_keys.iter().map(move |&b| ((a, b), 1)))
            .collect();

        let mut layers = Vec::with_capacity(robots + 2);
        layers.push(human);
        for _ in 0..robots {
            let next = layer_costs(directional, &dir_keys, &layers[layers.len() - 1])?;
            layers.push(next);
        }
        let door = layer_costs(numeric, &dir_keys, &layers[layers.len() - 1])?;
        layers.push(door);
        log::debug!("keypad chain: {} layers built", layers.len());
        Ok(Self { layers })
    }

    /// Number of directional keypads operated by robots.
    pub fn robots(&self) -> usize {
        self.layers.len() - 2
    }

    /// Press costs on the numeric keypad, in human key presses.
    pub fn door_costs(&self) -> &PressCosts {
        &self.layers[self.layers.len() - 1]
    }

    /// Human presses needed to type `code` on the numeric keypad, starting
    /// with the arm over `A`.
    pub fn cost(&self, code: &str) -> Result<Cost, KeypadError> {
        let door = self.door_costs();
        let mut prev = ACTIVATE;
        let mut total: Cost = 0;
        for ch in code.chars() {
            let c = match door.get(&(prev, ch)) {
                Some(&c) => c,
                // Every key has an entry to itself.
                None if door.contains_key(&(ch, ch)) => return Err(KeypadError::UnknownKey(prev)),
                None => return Err(KeypadError::UnknownKey(ch)),
            };
            if c == UNREACHABLE {
                return Err(KeypadError::Unreachable { from: prev, to: ch });
            }
            total = total.checked_add(c).ok_or(KeypadError::Overflow)?;
            prev = ch;
        }
        Ok(total)
    }

    /// [`cost`](Self::cost) times the numeric part of the code.
    pub fn complexity(&self, code: &str) -> Result<Cost, KeypadError> {
        let digits: String = code.chars().filter(char::is_ascii_digit).collect();
        let value: Cost = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| KeypadError::Overflow)?
        };
        self.cost(code)?
            .checked_mul(value)
            .ok_or(KeypadError::Overflow)
    }
}

impl fmt::Display for KeypadChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "keypad chain with {} robot(s)", self.robots())
    }
}

/// Press costs on `pad` when its arm is steered from a directional keypad
/// whose own press costs are `controller`.
fn layer_costs(pad: &Keypad, dir_keys: &[char], controller: &PressCosts) -> Result<PressCosts, KeypadError> {
    let press = |from: char, to: char| controller.get(&(from, to)).copied().filter(|&c| c != UNREACHABLE);
    let mut graph = Graph::new();
    for key in pad.keys() {
        let Some(pos) = pad.position(key) else {
            continue;
        };
        for &ctrl in dir_keys {
            let here = KeyState::Hover { key, ctrl };
            if let Some(c) = press(ctrl, ACTIVATE) {
                graph.add_edge(here, KeyState::Pressed(key), c)?;
            }
            for h in Heading::ALL {
                let Some(next) = pad.key_at(pos + h.delta()) else {
                    continue;
                };
                let Some(c) = press(ctrl, h.arrow()) else {
                    continue;
                };
                graph.add_edge(here, KeyState::Hover { key: next, ctrl: h.arrow() }, c)?;
            }
        }
    }

    let linked = linked_keys(pad)?;
    let mut pf = PathFinder::new(&graph);
    let mut costs = PressCosts::new();
    let keys = pad.keys();
    for &from in &keys {
        let table = pf.distances(&KeyState::Hover {
            key: from,
            ctrl: ACTIVATE,
        });
        for &to in &keys {
            let c = table.get(&KeyState::Pressed(to));
            // The arm can get there, so only the sum can be out of range.
            if c == UNREACHABLE && linked.contains(&(from, to)) {
                log::debug!("keypad chain: pressing {to} after {from} overflows");
                return Err(KeypadError::Overflow);
            }
            costs.insert((from, to), c);
        }
    }
    Ok(costs)
}

/// Key pairs joined by arm moves over `pad`, gaps excluded.
fn linked_keys(pad: &Keypad) -> Result<HashSet<(char, char)>, GraphError> {
    let mut graph = Graph::with_capacity(pad.len());
    for key in pad.keys() {
        graph.add_node(key);
        let Some(pos) = pad.position(key) else {
            continue;
        };
        for n in pos.neighbors_4() {
            if let Some(next) = pad.key_at(n) {
                graph.add_edge(key, next, 1)?;
            }
        }
    }
    let mut pf = PathFinder::new(&graph);
    let mut linked = HashSet::new();
    for from in pad.keys() {
        for (&to, _) in pf.distances(&from).reached() {
            linked.insert((from, to));
        }
    }
    Ok(linked)
}

/// Errors raised while building a [`KeypadChain`] or typing on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypadError {
    Graph(GraphError),
    /// A key that is not on the door keypad.
    UnknownKey(char),
    /// Keys separated by gaps the arm cannot cross.
    Unreachable { from: char, to: char },
    /// A press count too large for a [`Cost`].
    Overflow,
}

impl fmt::Display for KeypadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graph(e) => write!(f, "{e}"),
            Self::UnknownKey(ch) => write!(f, "keypad has no key {ch:?}"),
            Self::Unreachable { from, to } => write!(f, "cannot move from key {from:?} to key {to:?}"),
            Self::Overflow => write!(f, "press count overflows"),
        }
    }
}

impl std::error::Error for KeypadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for KeypadError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [&str; 5] = ["029A", "980A", "179A", "456A", "379A"];

    #[test]
    fn layouts() {
        let num = Keypad::numeric();
        assert_eq!(num.len(), 11);
        assert_eq!(num.position('7'), Some(Point::new(0, 0)));
        assert_eq!(num.position('A'), Some(Point::new(2, 3)));
        assert_eq!(num.key_at(Point::new(0, 3)), None);
        let dir = Keypad::directional();
        assert_eq!(dir.keys(), ['<', '>', 'A', '^', 'v']);
        assert_eq!(Keypad::parse(Keypad::DIRECTIONAL_LAYOUT).unwrap(), dir);
    }

    #[test]
    fn duplicate_keys_rejected() {
        let err = Keypad::parse("12\n1 ").unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidRune {
                ch: '1',
                pos: Point::new(0, 1)
            }
        );
    }

    #[test]
    fn direct_typing() {
        let chain = KeypadChain::new(0).unwrap();
        // <A ^A >^^A vvvA
        assert_eq!(chain.cost("029A"), Ok(12));
        assert_eq!(chain.cost("379A"), Ok(14));
        assert_eq!(chain.cost(""), Ok(0));
    }

    #[test]
    fn one_and_two_robots() {
        assert_eq!(KeypadChain::new(1).unwrap().cost("029A"), Ok(28));
        let chain = KeypadChain::new(2).unwrap();
        assert_eq!(chain.robots(), 2);
        assert_eq!(chain.cost("029A"), Ok(68));
        assert_eq!(chain.cost("980A"), Ok(60));
        assert_eq!(chain.cost("179A"), Ok(68));
        assert_eq!(chain.cost("456A"), Ok(64));
        assert_eq!(chain.cost("379A"), Ok(64));
    }

    #[test]
    fn example_complexity() {
        let chain = KeypadChain::new(2).unwrap();
        let total: Cost = EXAMPLE.iter().map(|c| chain.complexity(c).unwrap()).sum();
        assert_eq!(total, 126384);
    }

    #[test]
    fn many_robots_stay_finite() {
        let chain = KeypadChain::new(25).unwrap();
        let c = chain.cost("029A").unwrap();
        assert!(c > 68);
        assert!(c < UNREACHABLE);
    }

    #[test]
    fn deep_chains_overflow_instead_of_wrapping() {
        let chain = KeypadChain::new(45).unwrap();
        let presses = chain.cost("980A").unwrap();
        assert!(presses > 0 && presses < UNREACHABLE);
        assert_eq!(chain.complexity("980A"), Err(KeypadError::Overflow));
        assert_eq!(chain.complexity("A"), Ok(0));
        assert_eq!(KeypadChain::new(60).unwrap_err(), KeypadError::Overflow);
    }

    #[test]
    fn unknown_key() {
        let chain = KeypadChain::new(0).unwrap();
        assert_eq!(chain.cost("12B"), Err(KeypadError::UnknownKey('B')));
        assert_eq!(chain.complexity("12B"), Err(KeypadError::UnknownKey('B')));
    }

    #[test]
    fn keys_across_a_gap_are_unreachable() {
        let split = Keypad::parse("1 A").unwrap();
        let chain = KeypadChain::with_keypads(&split, &Keypad::directional(), 1).unwrap();
        assert_eq!(chain.cost("A"), Ok(chain.door_costs()[&('A', 'A')]));
        assert_eq!(
            chain.cost("1A"),
            Err(KeypadError::Unreachable { from: 'A', to: '1' })
        );
    }
}
