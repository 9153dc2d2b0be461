//! Unit tests for the message envelope: property bridge, state machine,
//! cached fields, correlation resolver, and acknowledgement.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::message::adapters::memory::{InMemoryCoreMessage, InMemorySession};
use crate::message::dispatch::{BYTES_TYPE, DEFAULT_TYPE};
use crate::message::domain::headers;
use crate::message::domain::{DeliveryMode, Destination, PropertyValue};
use crate::message::envelope::MessageEnvelope;
use crate::message::error::{InvalidNameError, MessageError};
use crate::message::ports::transport::CoreMessage;
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

fn outbound() -> MessageEnvelope<InMemoryCoreMessage> {
    let session = InMemorySession::new();
    MessageEnvelope::outbound(&session, &DefaultClock)
}

fn received(discriminator: u8) -> (MessageEnvelope<InMemoryCoreMessage>, Arc<InMemorySession>) {
    received_message(InMemoryCoreMessage::received(discriminator))
}

fn received_message(
    message: InMemoryCoreMessage,
) -> (MessageEnvelope<InMemoryCoreMessage>, Arc<InMemorySession>) {
    let session = Arc::new(InMemorySession::new());
    let envelope = MessageEnvelope::received(message, session.clone());
    (envelope, session)
}

// ============================================================================
// Initial state
// ============================================================================

#[rstest]
fn outbound_messages_start_fully_writable() {
    let envelope = outbound();
    assert!(envelope.is_body_writable());
    assert!(envelope.are_properties_writable());
    assert_eq!(envelope.delivery_mode(), DeliveryMode::Persistent);
    assert_eq!(envelope.priority(), 4);
    assert_eq!(envelope.expiration(), 0);
}

#[rstest]
fn outbound_messages_have_no_server_assigned_id() {
    let mut envelope = outbound();
    assert_eq!(envelope.message_id(), None);
}

#[rstest]
fn received_messages_start_fully_read_only() {
    let (envelope, _session) = received(DEFAULT_TYPE);
    assert!(!envelope.is_body_writable());
    assert!(!envelope.are_properties_writable());
}

// ============================================================================
// Property round-trips
// ============================================================================

#[rstest]
fn every_scalar_type_round_trips() {
    let mut envelope = outbound();
    envelope.set_boolean_property("b", true).expect("write");
    envelope.set_byte_property("by", 7).expect("write");
    envelope.set_short_property("s", 300).expect("write");
    envelope.set_int_property("i", 70_000).expect("write");
    envelope.set_long_property("l", 1 << 40).expect("write");
    envelope.set_float_property("f", 1.25).expect("write");
    envelope.set_double_property("d", 2.5).expect("write");
    envelope.set_string_property("t", "hello").expect("write");

    assert!(envelope.boolean_property("b").expect("read"));
    assert_eq!(envelope.byte_property("by").expect("read"), 7);
    assert_eq!(envelope.short_property("s").expect("read"), 300);
    assert_eq!(envelope.int_property("i").expect("read"), 70_000);
    assert_eq!(envelope.long_property("l").expect("read"), 1 << 40);
    assert_eq!(envelope.float_property("f").expect("read"), 1.25);
    assert_eq!(envelope.double_property("d").expect("read"), 2.5);
    assert_eq!(
        envelope.string_property("t").expect("read").as_deref(),
        Some("hello")
    );
}

#[rstest]
fn writes_preserve_the_concrete_type_and_reads_widen() {
    let mut envelope = outbound();
    envelope.set_byte_property("n", 5).expect("write");

    assert_eq!(envelope.short_property("n").expect("byte widens"), 5);
    assert_eq!(envelope.int_property("n").expect("byte widens"), 5);
    assert_eq!(envelope.long_property("n").expect("byte widens"), 5);
    assert!(matches!(
        envelope.double_property("n"),
        Err(MessageError::Format(_))
    ));
}

#[rstest]
fn overwrite_on_set_replaces_the_previous_value() {
    let mut envelope = outbound();
    envelope.set_int_property("n", 1).expect("write");
    envelope.set_string_property("n", "two").expect("write");
    assert_eq!(
        envelope.object_property("n"),
        Some(PropertyValue::Text("two".into()))
    );
}

// ============================================================================
// Absent properties
// ============================================================================

#[rstest]
fn absent_boolean_reads_as_false() {
    let envelope = outbound();
    assert!(!envelope.boolean_property("missing").expect("lenient read"));
}

#[rstest]
fn absent_numeric_properties_are_format_errors() {
    let envelope = outbound();
    assert!(matches!(
        envelope.int_property("missing"),
        Err(MessageError::Format(_))
    ));
    assert!(matches!(
        envelope.double_property("missing"),
        Err(MessageError::Format(_))
    ));
}

#[rstest]
fn absent_string_and_object_read_as_none() {
    let envelope = outbound();
    assert_eq!(envelope.string_property("missing").expect("read"), None);
    assert_eq!(envelope.object_property("missing"), None);
    assert!(!envelope.property_exists("missing"));
}

// ============================================================================
// Name validation at the bridge
// ============================================================================

#[rstest]
fn invalid_names_never_reach_the_store() {
    let mut envelope = outbound();
    assert!(matches!(
        envelope.set_int_property("7orders", 1),
        Err(MessageError::InvalidName(InvalidNameError::NotAnIdentifier(_)))
    ));
    assert!(matches!(
        envelope.set_int_property("BETWEEN", 1),
        Err(MessageError::InvalidName(InvalidNameError::Reserved(_)))
    ));
    assert!(matches!(
        envelope.set_int_property("JMS_ACTIVEMQ_foo", 1),
        Err(MessageError::InvalidName(
            InvalidNameError::ForbiddenPrefix { .. }
        ))
    ));
    assert!(matches!(
        envelope.set_int_property("", 1),
        Err(MessageError::InvalidName(InvalidNameError::Empty))
    ));
    assert!(envelope.property_names().is_empty());
}

#[rstest]
fn writes_to_received_messages_fail_before_name_validation() {
    let (mut envelope, _session) = received(DEFAULT_TYPE);
    assert!(matches!(
        envelope.set_int_property("orderCount", 1),
        Err(MessageError::NotWritable(_))
    ));
}

#[rstest]
fn input_stream_property_write_carries_a_hint_on_received_messages() {
    let (mut envelope, _session) = received(DEFAULT_TYPE);
    let err = envelope
        .set_object_property(headers::INPUT_STREAM_PROPERTY, PropertyValue::Bool(true))
        .expect_err("received messages reject the input stream");
    assert!(err.to_string().contains("did you mean"));
}

// ============================================================================
// clear_properties / clear_body
// ============================================================================

#[rstest]
fn clear_properties_purges_and_unlocks() {
    let message = InMemoryCoreMessage::received(DEFAULT_TYPE)
        .with_property("orderCount", PropertyValue::Int(3));
    let (mut envelope, _session) = received_message(message);

    assert!(envelope.property_exists("orderCount"));
    envelope.clear_properties();

    assert!(!envelope.property_exists("orderCount"));
    assert!(envelope.are_properties_writable());
    envelope
        .set_int_property("orderCount", 4)
        .expect("writable after clear");
}

#[rstest]
fn clear_properties_keeps_envelope_headers() {
    let mut envelope = outbound();
    envelope.set_classification("invoice");
    envelope.set_int_property("orderCount", 3).expect("write");

    envelope.clear_properties();

    assert_eq!(
        envelope.classification().expect("header read").as_deref(),
        Some("invoice")
    );
    assert!(!envelope.property_exists("orderCount"));
}

#[rstest]
fn clear_body_unlocks_a_received_body() {
    let (mut envelope, _session) = received(BYTES_TYPE);
    assert!(envelope.check_body_writable().is_err());

    envelope.clear_body();

    assert!(envelope.check_body_writable().is_ok());
    // Properties stay read-only; the two halves are independent.
    assert!(!envelope.are_properties_writable());
}

#[rstest]
fn body_read_guard_rejects_messages_under_construction() {
    let envelope = outbound();
    assert!(matches!(
        envelope.check_body_readable(),
        Err(MessageError::NotReadable)
    ));
}

// ============================================================================
// Priority and delivery mode
// ============================================================================

#[rstest]
#[case(0)]
#[case(9)]
fn boundary_priorities_are_accepted(#[case] priority: i32) {
    let mut envelope = outbound();
    envelope.set_priority(priority).expect("boundary is valid");
    assert_eq!(i32::from(envelope.priority()), priority);
}

#[rstest]
#[case(-1)]
#[case(10)]
fn out_of_range_priorities_never_reach_the_store(#[case] priority: i32) {
    let mut envelope = outbound();
    assert!(matches!(
        envelope.set_priority(priority),
        Err(MessageError::Format(_))
    ));
    assert_eq!(envelope.priority(), 4);
}

#[rstest]
fn delivery_mode_codes_map_to_durability() {
    let mut envelope = outbound();

    envelope.set_delivery_mode_code(2).expect("persistent");
    assert!(envelope.core().is_durable());

    envelope.set_delivery_mode_code(1).expect("non-persistent");
    assert!(!envelope.core().is_durable());

    assert!(matches!(
        envelope.set_delivery_mode_code(3),
        Err(MessageError::Format(_))
    ));
}

// ============================================================================
// Redelivery
// ============================================================================

#[rstest]
fn first_delivery_is_not_a_redelivery() {
    let (envelope, _session) =
        received_message(InMemoryCoreMessage::received(DEFAULT_TYPE).with_delivery_count(1));
    assert!(!envelope.redelivered());
}

#[rstest]
fn second_delivery_reports_redelivered() {
    let (envelope, _session) =
        received_message(InMemoryCoreMessage::received(DEFAULT_TYPE).with_delivery_count(2));
    assert!(envelope.redelivered());
}

#[rstest]
fn set_redelivered_adjusts_the_counter() {
    let (mut envelope, _session) =
        received_message(InMemoryCoreMessage::received(DEFAULT_TYPE).with_delivery_count(5));

    envelope.set_redelivered(false);
    assert_eq!(envelope.core().delivery_count(), 1);

    envelope.set_redelivered(true);
    assert_eq!(envelope.core().delivery_count(), 2);

    // An already-recorded redelivery is left alone.
    envelope.core_mut().set_delivery_count(7);
    envelope.set_redelivered(true);
    assert_eq!(envelope.core().delivery_count(), 7);
}

#[rstest]
fn delivery_count_is_synthesised_not_stored() {
    let (envelope, _session) =
        received_message(InMemoryCoreMessage::received(DEFAULT_TYPE).with_delivery_count(3));

    assert_eq!(
        envelope
            .int_property(headers::JMSX_DELIVERY_COUNT)
            .expect("synthesised"),
        3
    );
    assert_eq!(
        envelope
            .long_property(headers::JMSX_DELIVERY_COUNT)
            .expect("synthesised"),
        3
    );
    assert_eq!(
        envelope
            .string_property(headers::JMSX_DELIVERY_COUNT)
            .expect("synthesised")
            .as_deref(),
        Some("3")
    );
    assert_eq!(
        envelope.object_property(headers::JMSX_DELIVERY_COUNT),
        Some(PropertyValue::Text("3".into()))
    );
    assert!(envelope.property_exists(headers::JMSX_DELIVERY_COUNT));
    // But it is never enumerated.
    assert!(envelope.property_names().is_empty());
}

// ============================================================================
// Group id aliasing
// ============================================================================

#[rstest]
fn group_id_is_aliased_to_its_header() {
    let mut envelope = outbound();
    envelope
        .set_string_property(headers::JMSX_GROUP_ID, "group-1")
        .expect("write");

    assert_eq!(
        envelope
            .string_property(headers::JMSX_GROUP_ID)
            .expect("aliased read")
            .as_deref(),
        Some("group-1")
    );
    assert!(envelope.property_exists(headers::JMSX_GROUP_ID));
    // The alias lands in a header, not a user property.
    assert!(envelope.property_names().is_empty());
}

// ============================================================================
// Message id
// ============================================================================

#[rstest]
fn message_id_is_derived_with_prefix_and_cached() {
    let (mut envelope, _session) = received(DEFAULT_TYPE);
    let id = envelope.message_id().expect("delivered messages carry ids");
    assert!(id.starts_with("ID:"));
    assert_eq!(envelope.message_id().as_deref(), Some(id.as_str()));
}

#[rstest]
fn explicit_message_id_requires_the_prefix() {
    let mut envelope = outbound();
    assert!(matches!(
        envelope.set_message_id(Some("order-7".into())),
        Err(MessageError::InvalidMessageId)
    ));
    envelope
        .set_message_id(Some("ID:order-7".into()))
        .expect("prefixed id is accepted");
    assert_eq!(envelope.message_id().as_deref(), Some("ID:order-7"));
}

#[rstest]
fn explicit_message_id_clears_the_transport_value() {
    let (mut envelope, _session) = received(DEFAULT_TYPE);
    envelope.set_message_id(None).expect("clearing is legal");
    assert_eq!(envelope.core().user_id(), None);
    assert_eq!(envelope.message_id(), None);
}

#[rstest]
fn reset_message_id_overrides_without_validation() {
    let mut envelope = outbound();
    envelope.reset_message_id("ID:assigned-by-send");
    assert_eq!(envelope.message_id().as_deref(), Some("ID:assigned-by-send"));
}

// ============================================================================
// Cached destination fields and classification
// ============================================================================

#[rstest]
fn destination_is_resolved_from_the_address_once() {
    let (mut envelope, _session) =
        received_message(InMemoryCoreMessage::received(DEFAULT_TYPE).with_address("orders.in"));
    assert_eq!(
        envelope.destination(),
        Some(Destination::from_address("orders.in"))
    );
}

#[rstest]
fn set_destination_overrides_the_cache() {
    let mut envelope = outbound();
    assert_eq!(envelope.destination(), None);
    envelope.set_destination(Some(Destination::from_address("orders.out")));
    assert_eq!(
        envelope.destination(),
        Some(Destination::from_address("orders.out"))
    );
}

#[rstest]
fn reply_to_round_trips_through_the_header() {
    let mut envelope = outbound();
    envelope.set_reply_to(Some(Destination::from_address("replies")));
    assert_eq!(
        envelope.reply_to().expect("read"),
        Some(Destination::from_address("replies"))
    );

    envelope.set_reply_to(None);
    assert_eq!(envelope.reply_to().expect("read"), None);
    assert_eq!(envelope.core().property(headers::HDR_REPLY_TO), None);
}

#[rstest]
fn classification_round_trips_and_caches() {
    let mut envelope = outbound();
    assert_eq!(envelope.classification().expect("read"), None);
    envelope.set_classification("invoice");
    assert_eq!(
        envelope.classification().expect("read").as_deref(),
        Some("invoice")
    );
}

// ============================================================================
// Delivery time
// ============================================================================

#[rstest]
fn delivery_time_defaults_to_immediate() {
    let envelope = outbound();
    assert_eq!(envelope.delivery_time(), 0);
}

#[rstest]
fn delivery_time_round_trips() {
    let mut envelope = outbound();
    envelope.set_delivery_time(1_700_000_000_000);
    assert_eq!(envelope.delivery_time(), 1_700_000_000_000);
}

#[rstest]
fn unreadable_delivery_time_defaults_to_immediate() {
    let message = InMemoryCoreMessage::received(DEFAULT_TYPE).with_property(
        headers::HDR_SCHEDULED_DELIVERY_TIME,
        PropertyValue::Text("tomorrow".into()),
    );
    let (envelope, _session) = received_message(message);
    assert_eq!(envelope.delivery_time(), 0);
}

// ============================================================================
// Correlation identifier
// ============================================================================

#[rstest]
fn correlation_bytes_round_trip_and_refuse_text_reads() {
    let mut envelope = outbound();
    envelope.set_correlation_id_bytes(Some(&[0x01, 0x02]));

    assert_eq!(
        envelope.correlation_id_bytes().expect("bytes read"),
        Some(vec![0x01, 0x02])
    );
    assert!(matches!(
        envelope.correlation_id_text(),
        Err(MessageError::Format(_))
    ));
}

#[rstest]
fn correlation_text_round_trips_and_refuses_bytes_reads() {
    let mut envelope = outbound();
    envelope.set_correlation_id_text(Some("order-7"));

    assert_eq!(
        envelope.correlation_id_text().expect("text read").as_deref(),
        Some("order-7")
    );
    assert!(matches!(
        envelope.correlation_id_bytes(),
        Err(MessageError::Format(_))
    ));
}

#[rstest]
fn the_latest_encoding_is_authoritative() {
    let mut envelope = outbound();
    envelope.set_correlation_id_text(Some("order-7"));
    envelope.set_correlation_id_bytes(Some(&[0x09]));

    assert_eq!(
        envelope.correlation_id_bytes().expect("bytes read"),
        Some(vec![0x09])
    );
    assert!(envelope.correlation_id_text().is_err());
}

#[rstest]
fn absent_correlation_reads_as_none_in_both_encodings() {
    let mut envelope = outbound();
    assert_eq!(envelope.correlation_id_bytes().expect("read"), None);
    assert_eq!(envelope.correlation_id_text().expect("read"), None);

    envelope.set_correlation_id_text(Some("order-7"));
    envelope.set_correlation_id_text(None);
    assert_eq!(envelope.correlation_id_text().expect("read"), None);
}

// ============================================================================
// Enumeration
// ============================================================================

#[rstest]
fn enumeration_yields_user_keys_only() {
    let mut envelope = outbound();
    envelope.set_int_property("orderCount", 1).expect("write");
    envelope.set_string_property("region", "eu").expect("write");
    envelope.set_classification("invoice");
    envelope.set_correlation_id_text(Some("order-7"));
    envelope.set_delivery_time(5);

    let mut names = envelope.property_names();
    names.sort();
    assert_eq!(names, vec!["orderCount".to_owned(), "region".to_owned()]);
}

// ============================================================================
// Acknowledgement
// ============================================================================

#[rstest]
fn acknowledging_an_outbound_message_is_a_no_op() {
    let mut envelope = outbound();
    envelope.acknowledge().expect("no session, no work");
}

#[rstest]
fn batch_acknowledge_commits_without_individual_ack() {
    let (mut envelope, session) = received(DEFAULT_TYPE);
    envelope.acknowledge().expect("commit succeeds");

    assert!(!envelope.core().is_individually_acknowledged());
    assert_eq!(session.commit_count(), 1);
}

#[rstest]
fn individual_acknowledge_targets_the_message_then_commits() {
    let (mut envelope, session) = received(DEFAULT_TYPE);
    envelope.set_individual_acknowledge();
    envelope.acknowledge().expect("commit succeeds");

    assert!(envelope.core().is_individually_acknowledged());
    assert_eq!(session.commit_count(), 1);
}

#[rstest]
fn commit_failures_are_wrapped_and_surfaced() {
    let session = Arc::new(InMemorySession::failing());
    let mut envelope =
        MessageEnvelope::received(InMemoryCoreMessage::received(DEFAULT_TYPE), session);

    assert!(matches!(
        envelope.acknowledge(),
        Err(MessageError::Transport(_))
    ));
}

// ============================================================================
// Body streaming
// ============================================================================

#[rstest]
fn streaming_is_gated_by_discriminator() {
    let (mut envelope, _session) = received(DEFAULT_TYPE);
    let mut sink = Vec::new();
    assert!(matches!(
        envelope.save_to_output_stream(&mut sink),
        Err(MessageError::NotStreamCapable)
    ));
}

#[rstest]
fn received_bytes_messages_stream_their_body_out() {
    let message = InMemoryCoreMessage::received(BYTES_TYPE).with_body(vec![1, 2, 3]);
    let (mut envelope, _session) = received_message(message);

    let mut sink = Vec::new();
    envelope
        .save_to_output_stream(&mut sink)
        .expect("received bodies may be saved");
    assert_eq!(sink, vec![1, 2, 3]);

    assert!(envelope
        .wait_completion_on_stream(1_000)
        .expect("eager transfers complete"));
}

#[rstest]
fn input_streams_require_a_writable_body() {
    let (mut envelope, _session) = received(BYTES_TYPE);
    let err = envelope
        .set_input_stream(Box::new(std::io::empty()))
        .expect_err("received bodies are read-only");
    assert!(matches!(err, MessageError::NotWritable(_)));

    envelope.clear_body();
    envelope
        .set_input_stream(Box::new(std::io::Cursor::new(vec![9u8, 8])))
        .expect("cleared bodies are writable");
    assert_eq!(envelope.core().body(), &[9, 8]);
}

#[rstest]
fn output_streams_are_only_valid_on_received_bodies() {
    let session = InMemorySession::new();
    let mut message = crate::message::dispatch::BytesMessage::outbound(&session, &DefaultClock);
    assert!(matches!(
        message
            .envelope_mut()
            .set_output_stream(Box::new(Vec::<u8>::new())),
        Err(MessageError::NotReadable)
    ));
}
