//! Per-state search statistics.
//!
//! A [`SearchNode`] exists once per distinct canonical board visited by an
//! engine. Non-terminal nodes carry one [`Edge`] per legal action, in
//! ascending action order; that order is the fixed iteration order used for
//! deterministic tie-breaking during selection.

use games_gomoku::GameOutcome;

/// Statistics for one (state, action) pair.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Linear cell index of the action.
    pub action: usize,

    /// P(s,a): masked and renormalized prior.
    pub prior: f32,

    /// N(s,a)
    pub visits: u32,

    /// Q(s,a): running mean of backed-up values, from this state's mover.
    pub q: f32,
}

impl Edge {
    pub fn new(action: usize, prior: f32) -> Self {
        Self {
            action,
            prior,
            visits: 0,
            q: 0.0,
        }
    }

    /// UCB(s,a) = Q(s,a) + c_puct * P(s,a) * sqrt(N(s)) / (1 + N(s,a))
    ///
    /// Takes pre-computed sqrt(N(s)) so it is computed once per selection.
    #[inline]
    pub fn ucb_score(&self, parent_visits_sqrt: f32, c_puct: f32) -> f32 {
        let u = c_puct * self.prior * parent_visits_sqrt / (1.0 + self.visits as f32);
        self.q + u
    }

    /// Fold a backed-up value into the running mean.
    #[inline]
    pub fn update(&mut self, value: f32) {
        let n = self.visits as f32;
        self.q = (n * self.q + value) / (n + 1.0);
        self.visits += 1;
    }
}

/// Search statistics for one canonical board.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// N(s)
    pub visits: u32,

    /// Outcome cached at creation. Terminal nodes have no edges.
    pub terminal: Option<GameOutcome>,

    /// One edge per legal action, ascending by action.
    pub edges: Vec<Edge>,
}

impl SearchNode {
    /// Node for a finished game.
    pub fn terminal(outcome: GameOutcome) -> Self {
        Self {
            visits: 0,
            terminal: Some(outcome),
            edges: Vec::new(),
        }
    }

    /// Freshly expanded node with the given priors.
    pub fn expanded(edges: Vec<Edge>) -> Self {
        Self {
            visits: 0,
            terminal: None,
            edges,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Index into `edges` of the highest UCB score.
    ///
    /// Ties keep the earliest edge: only a strictly greater score replaces the
    /// current best.
    pub fn select_edge(&self, c_puct: f32) -> Option<usize> {
        let parent_visits_sqrt = (self.visits as f32).sqrt();
        let mut best_score = f32::NEG_INFINITY;
        let mut best = None;

        for (i, edge) in self.edges.iter().enumerate() {
            let score = edge.ucb_score(parent_visits_sqrt, c_puct);
            if score > best_score {
                best_score = score;
                best = Some(i);
            }
        }
        best
    }

    /// Record a backed-up value for the edge at `index`.
    pub fn record(&mut self, index: usize, value: f32) {
        self.edges[index].update(value);
        self.visits += 1;
    }

    /// Edge for `action`, if it is legal here.
    pub fn edge(&self, action: usize) -> Option<&Edge> {
        self.edges
            .binary_search_by_key(&action, |e| e.action)
            .ok()
            .map(|i| &self.edges[i])
    }

    /// Legality mask over `num_actions` cells, rebuilt from the edges.
    pub fn valid_mask(&self, num_actions: usize) -> Vec<bool> {
        let mut mask = vec![false; num_actions];
        for edge in &self.edges {
            mask[edge.action] = true;
        }
        mask
    }

    /// N(s,a) for every action; illegal and unvisited actions are 0.
    pub fn visit_counts(&self, num_actions: usize) -> Vec<u32> {
        let mut counts = vec![0; num_actions];
        for edge in &self.edges {
            counts[edge.action] = edge.visits;
        }
        counts
    }
}
