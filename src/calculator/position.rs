#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub quantity: f64,
    pub average_price: f64,
}

impl Position {
    pub fn new(quantity: f64, price: f64) -> Self {
        Position {
            quantity,
            average_price: price,
        }
    }

    pub fn cost_basis(&self) -> f64 {
        self.average_price * self.quantity
    }

    // Average after buying `quantity` more at `price`
    pub fn buy(&mut self, quantity: f64, price: f64) {
        let total_cost = self.cost_basis() + price * quantity;
        self.quantity += quantity;
        self.average_price = total_cost / self.quantity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buying_blends_average() {
        let mut position = Position::new(1.0, 100.0);
        position.buy(1.0, 110.0);

        // (100 * 1 + 110 * 1) / 2 = 105
        assert_eq!(position.quantity, 2.0);
        assert_eq!(position.average_price, 105.0);
    }

    #[test]
    fn cost_basis_is_quantity_times_average() {
        let position = Position::new(100.0, 150.0);
        assert_eq!(position.cost_basis(), 15000.0);
    }
}
