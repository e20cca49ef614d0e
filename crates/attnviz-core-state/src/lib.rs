use attnviz_core_kernel::{
    Matrix, Order, Rgb, Token, TokenValues, color_for, compute_matrix, parse_value, shuffle,
};
use log::{debug, info};
use rand::Rng;

pub mod command;

pub use command::{BiasSwitch, Command};

/// Everything the front end owns between redraws.
///
/// `matrix` is derived state. Every mutator rebuilds it from scratch before
/// returning, so readers never observe a stale matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerState {
    values: TokenValues,
    order: Order,
    bias: bool,
    matrix: Matrix,
}

impl Default for VisualizerState {
    fn default() -> Self {
        Self::new(TokenValues::default(), Order::default(), false)
    }
}

/// What the caller should do after applying a command.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// State changed, draw again.
    Redraw,
    /// Nothing changed, draw again on request.
    Show,
    Help,
    Quit,
}

impl VisualizerState {
    pub fn new(values: TokenValues, order: Order, bias: bool) -> Self {
        let matrix = compute_matrix(&values, &order, bias);
        Self {
            values,
            order,
            bias,
            matrix,
        }
    }

    #[inline(always)]
    pub fn values(&self) -> &TokenValues {
        &self.values
    }

    #[inline(always)]
    pub fn order(&self) -> &Order {
        &self.order
    }

    #[inline(always)]
    pub fn bias(&self) -> bool {
        self.bias
    }

    #[inline(always)]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Token at each display position, in display order.
    pub fn ordered_tokens(&self) -> Vec<Option<Token>> {
        self.order.tokens().collect()
    }

    pub fn color_at(&self, i: usize, j: usize) -> Option<Rgb> {
        self.matrix.get(i, j).map(|v| color_for(v, &self.matrix))
    }

    fn recompute(&mut self) {
        self.matrix = compute_matrix(&self.values, &self.order, self.bias);
    }

    pub fn set_value(&mut self, token: Token, value: i64) {
        debug!("state: {} = {}", token, value);
        self.values.set(token, value);
        self.recompute();
    }

    /// Store whatever the user typed; unparseable text becomes 0.
    pub fn set_raw_value(&mut self, token: Token, raw: &str) -> i64 {
        let value = parse_value(raw);
        self.set_value(token, value);
        value
    }

    pub fn set_bias(&mut self, enabled: bool) {
        debug!("state: bias = {}", enabled);
        self.bias = enabled;
        self.recompute();
    }

    pub fn toggle_bias(&mut self) -> bool {
        self.set_bias(!self.bias);
        self.bias
    }

    // only shuffle_with moves the order
    fn set_order(&mut self, order: Order) {
        debug!("state: order = {}", order);
        self.order = order;
        self.recompute();
    }

    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) -> &Order {
        let next = shuffle(&self.order, rng);
        info!("shuffled order {} -> {}", self.order, next);
        self.set_order(next);
        &self.order
    }

    /// Back to the startup values and bias. The display order stays where
    /// the last shuffle put it.
    pub fn reset(&mut self) {
        debug!("state: reset values and bias");
        self.values = TokenValues::default();
        self.bias = false;
        self.recompute();
    }

    /// Apply one interactive command.
    pub fn apply<R: Rng>(&mut self, cmd: Command, rng: &mut R) -> Outcome {
        match cmd {
            Command::Set { token, raw } => {
                self.set_raw_value(token, &raw);
                Outcome::Redraw
            }
            Command::Bias(BiasSwitch::On) => {
                self.set_bias(true);
                Outcome::Redraw
            }
            Command::Bias(BiasSwitch::Off) => {
                self.set_bias(false);
                Outcome::Redraw
            }
            Command::Bias(BiasSwitch::Toggle) => {
                self.toggle_bias();
                Outcome::Redraw
            }
            Command::Shuffle => {
                self.shuffle_with(rng);
                Outcome::Redraw
            }
            Command::Reset => {
                self.reset();
                Outcome::Redraw
            }
            Command::Show => Outcome::Show,
            Command::Help => Outcome::Help,
            Command::Quit => Outcome::Quit,
        }
    }
}
