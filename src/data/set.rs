use super::channel::{Channel, ChannelData};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// ChannelSet – an ordered multi-output dataset
// ---------------------------------------------------------------------------

/// An ordered collection of [`Channel`]s forming one multi-output dataset.
///
/// Insertion order is preserved and meaningful: it defines positional
/// indexing and the order of every aggregate accessor. Channels are never
/// reordered or deduplicated, and duplicate names are allowed — name lookup
/// returns the first match in insertion order, which is intentional.
#[derive(Debug, Clone, Default)]
pub struct ChannelSet {
    channels: Vec<Channel>,
}

impl ChannelSet {
    pub fn new() -> Self {
        ChannelSet::default()
    }

    /// Append one channel at the end of the set.
    pub fn append(&mut self, channel: Channel) {
        self.channels.push(channel);
    }

    /// Append all channels of another set, keeping their existing order.
    pub fn merge(&mut self, other: ChannelSet) {
        self.channels.extend(other.channels);
    }

    /// Number of channels (the dataset's output dimensionality). O(1).
    pub fn output_dims(&self) -> usize {
        self.channels.len()
    }

    /// Per-channel input dimension counts, in insertion order.
    pub fn input_dims(&self) -> Vec<usize> {
        self.channels.iter().map(Channel::input_dims).collect()
    }

    /// Channel names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.channels.iter().map(Channel::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    /// Channel at a position.
    pub fn channel(&self, index: usize) -> Result<&Channel, DataError> {
        self.channels.get(index).ok_or(DataError::IndexOutOfRange {
            index,
            len: self.channels.len(),
        })
    }

    pub fn channel_mut(&mut self, index: usize) -> Result<&mut Channel, DataError> {
        let len = self.channels.len();
        self.channels
            .get_mut(index)
            .ok_or(DataError::IndexOutOfRange { index, len })
    }

    /// First channel with a matching name, in insertion order.
    pub fn channel_by_name(&self, name: &str) -> Result<&Channel, DataError> {
        self.channels
            .iter()
            .find(|ch| ch.name() == name)
            .ok_or_else(|| DataError::ChannelNotFound {
                name: name.to_string(),
            })
    }

    pub fn channel_by_name_mut(&mut self, name: &str) -> Result<&mut Channel, DataError> {
        self.channels
            .iter_mut()
            .find(|ch| ch.name() == name)
            .ok_or_else(|| DataError::ChannelNotFound {
                name: name.to_string(),
            })
    }

    /// All rows of every channel: per-channel input matrices paired with
    /// per-channel output vectors, in insertion order.
    pub fn data(&self) -> (Vec<Vec<Vec<f64>>>, Vec<Vec<f64>>) {
        self.collect(Channel::data)
    }

    /// Mask-true rows of every channel.
    pub fn train_data(&self) -> (Vec<Vec<Vec<f64>>>, Vec<Vec<f64>>) {
        self.collect(Channel::train_data)
    }

    /// Mask-false rows of every channel. See [`Channel::test_data`] for the
    /// `transformed` flag.
    pub fn test_data(&self, transformed: bool) -> (Vec<Vec<Vec<f64>>>, Vec<Vec<f64>>) {
        self.collect(|ch| ch.test_data(transformed))
    }

    fn collect<F: Fn(&Channel) -> ChannelData>(&self, view: F) -> (Vec<Vec<Vec<f64>>>, Vec<Vec<f64>>) {
        self.channels.iter().map(view).unzip()
    }
}

impl<'a> IntoIterator for &'a ChannelSet {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::channel::Dimension;

    fn channel(name: &str, dims: usize, n: usize) -> Channel {
        let inputs = (0..dims)
            .map(|d| Dimension::new(format!("x{d}"), vec![0.0; n]))
            .collect();
        Channel::new(name, inputs, vec![1.0; n]).unwrap()
    }

    #[test]
    fn output_dims_counts_every_append() {
        let mut set = ChannelSet::new();
        assert_eq!(set.output_dims(), 0);
        set.append(channel("a", 1, 3));
        set.append(channel("b", 2, 4));

        let mut other = ChannelSet::new();
        other.append(channel("c", 3, 2));
        other.append(channel("d", 1, 2));
        set.merge(other);

        assert_eq!(set.output_dims(), 4);
        assert_eq!(set.input_dims(), vec![1, 2, 3, 1]);
        assert_eq!(set.names(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn merging_two_singletons_concatenates_names() {
        let mut left = ChannelSet::new();
        left.append(channel("first", 1, 1));
        let mut right = ChannelSet::new();
        right.append(channel("second", 1, 1));

        left.merge(right);
        assert_eq!(left.output_dims(), 2);
        assert_eq!(left.names(), vec!["first", "second"]);
    }

    #[test]
    fn positional_lookup_checks_bounds() {
        let mut set = ChannelSet::new();
        set.append(channel("a", 1, 3));
        assert_eq!(set.channel(0).unwrap().name(), "a");
        let err = set.channel(1).unwrap_err();
        assert!(matches!(err, DataError::IndexOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn name_lookup_returns_first_match() {
        let mut set = ChannelSet::new();
        set.append(channel("dup", 1, 3));
        set.append(channel("dup", 2, 3));
        // Duplicate names are allowed; the earlier insertion wins.
        assert_eq!(set.channel_by_name("dup").unwrap().input_dims(), 1);

        let err = set.channel_by_name("missing").unwrap_err();
        assert!(matches!(err, DataError::ChannelNotFound { .. }));
    }

    #[test]
    fn aggregate_views_are_per_channel_and_mask_filtered() {
        let mut set = ChannelSet::new();
        let mut ch = Channel::new(
            "y",
            vec![Dimension::new("x", vec![0.0, 1.0, 2.0])],
            vec![10.0, 20.0, 30.0],
        )
        .unwrap();
        ch.set_train_mask(vec![true, false, true]).unwrap();
        set.append(ch);
        set.append(channel("z", 1, 2));

        let (inputs, outputs) = set.train_data();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0], vec![vec![0.0, 2.0]]);
        assert_eq!(outputs[0], vec![10.0, 30.0]);

        let (test_in, test_out) = set.test_data(false);
        assert_eq!(test_in[0], vec![vec![1.0]]);
        assert_eq!(test_out[0], vec![20.0]);
        assert!(test_out[1].is_empty());
    }
}
