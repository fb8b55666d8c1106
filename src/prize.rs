// bingo/src/prize.rs
// Prize pool split between the house and the round's winners.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrizeDistribution {
    pub total_stake: f64,
    pub house_commission: f64,
    pub prize_pool: f64,
    pub prize_per_winner: f64,
    pub winners: usize,
}

impl PrizeDistribution {
    /// Every player stakes `stake`; the house keeps `commission_rate` of the total.
    /// With no winners nothing is paid out and the pool reads as zero.
    pub fn calculate(
        total_players: usize,
        winners: usize,
        stake: f64,
        commission_rate: f64,
    ) -> Self {
        let total_stake = total_players as f64 * stake;
        let house_commission = total_stake * commission_rate;

        if winners == 0 {
            return PrizeDistribution {
                total_stake,
                house_commission,
                prize_pool: 0.0,
                prize_per_winner: 0.0,
                winners,
            };
        }

        let prize_pool = total_stake - house_commission;
        PrizeDistribution {
            total_stake,
            house_commission,
            prize_pool,
            prize_per_winner: prize_pool / winners as f64,
            winners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_winner() {
        let prize = PrizeDistribution::calculate(10, 1, 10.0, 0.2);
        assert!(close(prize.total_stake, 100.0));
        assert!(close(prize.house_commission, 20.0));
        assert!(close(prize.prize_pool, 80.0));
        assert!(close(prize.prize_per_winner, 80.0));
    }

    #[test]
    fn test_split_between_winners() {
        let prize = PrizeDistribution::calculate(6, 3, 10.0, 0.2);
        assert!(close(prize.prize_pool, 48.0));
        assert!(close(prize.prize_per_winner, 16.0));
        assert_eq!(prize.winners, 3);
    }

    #[test]
    fn test_no_winners() {
        let prize = PrizeDistribution::calculate(4, 0, 10.0, 0.2);
        assert!(close(prize.prize_pool, 0.0));
        assert!(close(prize.prize_per_winner, 0.0));
        assert!(close(prize.house_commission, 8.0));
    }
}
