use crate::error::DataError;

// ---------------------------------------------------------------------------
// Dimension – one named input axis
// ---------------------------------------------------------------------------

/// One input coordinate axis of a channel (e.g. time), already normalized to
/// plain numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub name: String,
    /// Display unit for the axis ("days", "seconds", ...), if known.
    pub unit: Option<String>,
    pub values: Vec<f64>,
}

impl Dimension {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Dimension {
            name: name.into(),
            unit: None,
            values,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Channel – one observed variable
// ---------------------------------------------------------------------------

/// One observed variable: input coordinate(s), output values, and a
/// train/test membership mask, all of the same length N.
///
/// Shape is fixed at construction. Only the mask and the registered
/// transformed values may change afterwards, and both setters re-validate
/// against N.
#[derive(Debug, Clone)]
pub struct Channel {
    name: String,
    inputs: Vec<Dimension>,
    output: Vec<f64>,
    train_mask: Vec<bool>,
    /// Output values after an upstream transform pipeline. `None` means no
    /// transform is registered and transformed data equals the raw output.
    transformed: Option<Vec<f64>>,
}

/// Row-filtered view of one channel: one `Vec<f64>` per input dimension,
/// plus the matching output values.
pub type ChannelData = (Vec<Vec<f64>>, Vec<f64>);

impl Channel {
    /// Build a channel from named input dimensions and one output column.
    ///
    /// Every input dimension must match the output length; the first
    /// mismatch fails with [`DataError::DimensionMismatch`]. The default
    /// train mask is all-true — the whole channel is training data until a
    /// split is applied elsewhere.
    pub fn new(
        name: impl Into<String>,
        inputs: Vec<Dimension>,
        output: Vec<f64>,
    ) -> Result<Self, DataError> {
        let n = output.len();
        for dim in &inputs {
            if dim.values.len() != n {
                return Err(DataError::DimensionMismatch {
                    dimension: dim.name.clone(),
                    expected: n,
                    actual: dim.values.len(),
                });
            }
        }
        Ok(Channel {
            name: name.into(),
            inputs,
            output,
            train_mask: vec![true; n],
            transformed: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of observations N.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Number of input dimensions.
    pub fn input_dims(&self) -> usize {
        self.inputs.len()
    }

    pub fn inputs(&self) -> &[Dimension] {
        &self.inputs
    }

    pub fn output(&self) -> &[f64] {
        &self.output
    }

    pub fn train_mask(&self) -> &[bool] {
        &self.train_mask
    }

    /// Replace the train/test mask. Must have length N.
    pub fn set_train_mask(&mut self, mask: Vec<bool>) -> Result<(), DataError> {
        if mask.len() != self.len() {
            return Err(DataError::DimensionMismatch {
                dimension: "train_mask".to_string(),
                expected: self.len(),
                actual: mask.len(),
            });
        }
        self.train_mask = mask;
        Ok(())
    }

    /// Register transformed output values from an upstream pipeline.
    /// Must have length N.
    pub fn set_transformed(&mut self, values: Vec<f64>) -> Result<(), DataError> {
        if values.len() != self.len() {
            return Err(DataError::DimensionMismatch {
                dimension: "transformed".to_string(),
                expected: self.len(),
                actual: values.len(),
            });
        }
        self.transformed = Some(values);
        Ok(())
    }

    /// Drop any registered transform, reverting to raw output.
    pub fn clear_transformed(&mut self) {
        self.transformed = None;
    }

    /// All rows, raw output.
    pub fn data(&self) -> ChannelData {
        self.select(|_| true, false)
    }

    /// Mask-true rows, raw output.
    pub fn train_data(&self) -> ChannelData {
        self.select(|m| m, false)
    }

    /// Mask-false rows. With `transformed` set, output values come from the
    /// registered transform when one exists; raw values otherwise.
    pub fn test_data(&self, transformed: bool) -> ChannelData {
        self.select(|m| !m, transformed)
    }

    fn select<F: Fn(bool) -> bool>(&self, keep: F, transformed: bool) -> ChannelData {
        let output_src = match (&self.transformed, transformed) {
            (Some(t), true) => t,
            _ => &self.output,
        };
        let rows: Vec<usize> = self
            .train_mask
            .iter()
            .enumerate()
            .filter(|(_, &m)| keep(m))
            .map(|(i, _)| i)
            .collect();

        let inputs = self
            .inputs
            .iter()
            .map(|dim| rows.iter().map(|&i| dim.values[i]).collect())
            .collect();
        let output = rows.iter().map(|&i| output_src[i]).collect();
        (inputs, output)
    }
}
