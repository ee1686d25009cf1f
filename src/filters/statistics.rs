/// Statistical summary of a data window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Mean value of the data
    pub mean: f64,
    /// Population standard deviation of the data
    pub std_dev: f64,
    /// Minimum value in the window
    pub min: f64,
    /// Maximum value in the window
    pub max: f64,
    /// Range (max - min) of the data
    pub range: f64,
}

impl Statistics {
    /// Summarize a set of values; `None` when there are none
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let data: Vec<f64> = values.into_iter().collect();
        if data.is_empty() {
            return None;
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            range: max - min,
        })
    }

    /// Whether the spread exceeds a standard deviation threshold
    pub fn is_moving(&self, std_dev_threshold: f64) -> bool {
        self.std_dev > std_dev_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_calculation() {
        let stats = Statistics::from_values([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.range, 4.0);
        assert!((stats.std_dev - std::f64::consts::SQRT_2).abs() < 1e-10);
        assert!(stats.is_moving(1.0));
        assert!(!stats.is_moving(2.0));
    }

    #[test]
    fn test_empty() {
        assert!(Statistics::from_values(std::iter::empty()).is_none());
    }
}
