use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use fnv::FnvHasher;
use indexmap::IndexMap;

use crate::metrics::{InstrumentValueType, MeterSharedState, Unit};
use crate::InstrumentationLibrary;

/// Identifies an instrument definition within a metrics pipeline.
///
/// Identity is carried by seven attributes: name, description, unit,
/// constant labels, label keys, value type, and the absolute flag. Two
/// descriptors are equal exactly when all seven match; hashing agrees with
/// equality. Constant labels compare as key/value pairs regardless of
/// insertion order, while label-key order is significant.
///
/// The meter shared state and instrumentation library attached at
/// construction are contextual only. Descriptors created by different meters
/// still collapse to the same identity when their attributes match, which is
/// what lets an implementation deduplicate instruments across meters.
///
/// Descriptors are immutable once constructed. The identity hash is
/// precomputed with [`FnvHasher`] so repeated map lookups stay cheap.
///
/// # Examples
///
/// ```
/// use telemetry_api::metrics::{
///     InstrumentDescriptor, InstrumentValueType, MeterSharedState, Unit,
/// };
/// use telemetry_api::InstrumentationLibrary;
///
/// let latency = InstrumentDescriptor::new(
///     "http.server.duration",
///     "Inbound request latency",
///     Unit::new("ms"),
///     [("deployment", "prod")],
///     ["http.route"],
///     InstrumentValueType::F64,
///     true,
///     MeterSharedState::default(),
///     InstrumentationLibrary::new("http-server", None),
/// );
/// assert!(latency.is_absolute());
/// assert_eq!(latency.unit().as_str(), "ms");
/// ```
#[derive(Clone, Debug)]
pub struct InstrumentDescriptor {
    name: Cow<'static, str>,
    description: Cow<'static, str>,
    unit: Unit,
    constant_labels: IndexMap<Cow<'static, str>, Cow<'static, str>>,
    label_keys: Vec<Cow<'static, str>>,
    value_type: InstrumentValueType,
    absolute: bool,
    shared_state: MeterSharedState,
    instrumentation_library: InstrumentationLibrary,
    identity_hash: u64,
}

impl InstrumentDescriptor {
    /// Create a new descriptor.
    ///
    /// Identity attributes come first, the contextual attachments last.
    /// When a constant-label key repeats, the value supplied last wins.
    #[allow(clippy::too_many_arguments)]
    pub fn new<K, V, L>(
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        unit: Unit,
        constant_labels: impl IntoIterator<Item = (K, V)>,
        label_keys: impl IntoIterator<Item = L>,
        value_type: InstrumentValueType,
        absolute: bool,
        shared_state: MeterSharedState,
        instrumentation_library: InstrumentationLibrary,
    ) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
        L: Into<Cow<'static, str>>,
    {
        let name = name.into();
        let description = description.into();
        let constant_labels: IndexMap<Cow<'static, str>, Cow<'static, str>> = constant_labels
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let label_keys: Vec<Cow<'static, str>> =
            label_keys.into_iter().map(Into::into).collect();

        let mut hasher = FnvHasher::default();
        name.hash(&mut hasher);
        description.hash(&mut hasher);
        unit.as_str().hash(&mut hasher);
        // Constant labels fold in sorted key order so insertion order cannot
        // change identity. Keys are unique within the map.
        let mut labels: Vec<(&str, &str)> = constant_labels
            .iter()
            .map(|(key, value)| (key.as_ref(), value.as_ref()))
            .collect();
        labels.sort();
        for (key, value) in labels {
            key.hash(&mut hasher);
            value.hash(&mut hasher);
        }
        label_keys.hash(&mut hasher);
        value_type.hash(&mut hasher);
        absolute.hash(&mut hasher);
        let identity_hash = hasher.finish();

        InstrumentDescriptor {
            name,
            description,
            unit,
            constant_labels,
            label_keys,
            value_type,
            absolute,
            shared_state,
            instrumentation_library,
            identity_hash,
        }
    }

    /// The instrument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A human-readable description of the instrument.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The unit recorded values are expressed in.
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Labels applied to every measurement of this instrument.
    ///
    /// Iteration follows insertion order; equality does not.
    pub fn constant_labels(&self) -> &IndexMap<Cow<'static, str>, Cow<'static, str>> {
        &self.constant_labels
    }

    /// The ordered label keys recorded values are dimensioned by.
    pub fn label_keys(&self) -> &[Cow<'static, str>] {
        &self.label_keys
    }

    /// The kind of value this instrument records.
    pub fn value_type(&self) -> InstrumentValueType {
        self.value_type
    }

    /// Whether this instrument accepts only non-negative recordings.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// The state shared with all instruments of the creating meter.
    ///
    /// Contextual only; never part of identity.
    pub fn shared_state(&self) -> &MeterSharedState {
        &self.shared_state
    }

    /// The library the creating meter records for.
    ///
    /// Contextual only; never part of identity.
    pub fn instrumentation_library(&self) -> &InstrumentationLibrary {
        &self.instrumentation_library
    }

    /// The precomputed hash over the identity attributes.
    pub fn identity_hash(&self) -> u64 {
        self.identity_hash
    }
}

impl PartialEq for InstrumentDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.identity_hash == other.identity_hash
            && self.value_type == other.value_type
            && self.absolute == other.absolute
            && self.name == other.name
            && self.description == other.description
            && self.unit == other.unit
            && self.label_keys == other.label_keys
            && self.constant_labels == other.constant_labels
    }
}

impl Eq for InstrumentDescriptor {}

impl Hash for InstrumentDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.identity_hash);
    }
}
