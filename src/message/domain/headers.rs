//! Well-known header and property names.
//!
//! Internal headers share the property bag with user properties but carry a
//! fixed prefix. Property-name enumeration filters on that prefix, so headers
//! never leak into the user-visible key set.

/// Prefix carried by every internal header name.
pub const INTERNAL_HEADER_PREFIX: &str = "_HDR_";

/// Header holding the free-text message classification.
pub const HDR_TYPE: &str = "_HDR_TYPE";

/// Header holding the reply-to destination address.
pub const HDR_REPLY_TO: &str = "_HDR_REPLY_TO";

/// Header holding the correlation identifier in either encoding.
pub const HDR_CORRELATION_ID: &str = "_HDR_CORRELATION_ID";

/// Header holding the message group identifier.
pub const HDR_GROUP_ID: &str = "_HDR_GROUP_ID";

/// Header holding the scheduled delivery timestamp in epoch milliseconds.
pub const HDR_SCHEDULED_DELIVERY_TIME: &str = "_HDR_SCHED_DELIVERY";

/// Synthetic property exposing the transport delivery counter.
///
/// Never read from the store: integer and textual reads of this name are
/// answered from the counter directly.
pub const JMSX_DELIVERY_COUNT: &str = "JMSXDeliveryCount";

/// Property name aliased to the group-id header.
pub const JMSX_GROUP_ID: &str = "JMSXGroupID";

/// Provider property name for attaching a body input stream.
///
/// Only meaningful on messages under construction; its name carries the
/// forbidden prefix so it can never be stored as a user property.
pub const INPUT_STREAM_PROPERTY: &str = "JMS_ACTIVEMQ_INPUT_STREAM";

/// Provider property name for attaching a body output stream.
pub const OUTPUT_STREAM_PROPERTY: &str = "JMS_ACTIVEMQ_OUTPUT_STREAM";

/// Provider property name for a blocking body save to an output stream.
pub const SAVE_STREAM_PROPERTY: &str = "JMS_ACTIVEMQ_SAVE_STREAM";

/// Prefix of every textual message identifier.
pub const MESSAGE_ID_PREFIX: &str = "ID:";
