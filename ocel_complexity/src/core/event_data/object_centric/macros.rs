//! Convenient Macros for Creating Object-centric Event Data
/// Creates an [`OCEL`] containing the given events, objects, event-to-object (e2o) relations.
///
/// `ocel!` allows `OCEL`s to be defined with a list of events and their e2o relations.
/// Each event is a tuple that contains as first entry the event type and as second entry the
/// related objects as a list of object identifier. Object identifiers have to be
/// denoted '`ob_type`':'`ob_id`'.
///
/// Events are labelled `ev:1`, `ev:2`, ... and receive timestamps one second apart, starting at
/// 2020-01-01 00:00:00 UTC, in the order they are listed.
///
/// ```
/// use ocel_complexity::ocel;
///
/// let object_centric_event_log = ocel![
///     events:
///     ("place", ["c:1", "o:1", "i:1", "i:2"]),
///     ("pack", ["o:1", "i:2", "e:1"]),
///     o2o:
///     ("o:1", "i:1")
/// ];
/// assert_eq!(object_centric_event_log.object_types.len(), 4);
/// ```
///
/// [`OCEL`]: crate::core::OCEL
#[macro_export]
macro_rules! ocel {
    (events: $(($ev_type:expr, [$($object:expr), *])), *, o2o: $(($from_ob:expr, $to_ob:expr)), *) => {{
        use ::std::collections::{BTreeMap, BTreeSet};
        use $crate::core::chrono::{TimeDelta, TimeZone, Utc};
        use $crate::core::event_data::object_centric::{
            OCEL, OCELEvent, OCELObject, OCELRelationship, OCELType,
        };

        let mut event_types_set: BTreeSet<String> = BTreeSet::new();
        let mut object_types_set: BTreeSet<String> = BTreeSet::new();
        let mut events = Vec::new();
        #[allow(unused_mut)]
        let mut object_id_to_object: BTreeMap<String, OCELObject> = BTreeMap::new();

        #[allow(unused_variables)]
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        #[allow(unused_mut, unused_variables)]
        let mut ev_counter: i64 = 0;
        $(
            event_types_set.insert($ev_type.to_string());

            // Objects are derived from the e2o relations
            #[allow(unused_mut)]
            let mut relations = Vec::new();
            $(
                let object_id = $object.to_string();
                let object_type = object_id.split(':').next().unwrap_or_default().to_string();
                relations.push(OCELRelationship::new(object_id.clone(), object_type.clone()));
                object_types_set.insert(object_type.clone());
                object_id_to_object
                    .entry(object_id.clone())
                    .or_insert_with(|| OCELObject::new(object_id, object_type));
            )*

            ev_counter += 1;
            events.push(OCELEvent::new(
                format!("ev:{}", ev_counter),
                $ev_type.to_string(),
                start + TimeDelta::seconds(ev_counter - 1),
                vec![],
                relations,
            ));
        )*

        $(
            let to_id = $to_ob.to_string();
            let to_type = to_id.split(':').next().unwrap_or_default().to_string();
            let from_id = $from_ob.to_string();
            let from_type = from_id.split(':').next().unwrap_or_default().to_string();
            object_types_set.insert(from_type.clone());
            object_types_set.insert(to_type.clone());
            object_id_to_object
                .entry(to_id.clone())
                .or_insert_with(|| OCELObject::new(to_id.clone(), to_type.clone()));
            object_id_to_object
                .entry(from_id.clone())
                .or_insert_with(|| OCELObject::new(from_id, from_type))
                .relationships
                .push(OCELRelationship::new(to_id, to_type));
        )*

        OCEL {
            event_types: event_types_set.into_iter().map(OCELType::new).collect(),
            object_types: object_types_set.into_iter().map(OCELType::new).collect(),
            events,
            objects: object_id_to_object.into_values().collect(),
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn ocel_macro_builds_events_and_objects() {
        let ocel = crate::ocel![
            events:
            ("place", ["c:1", "o:1", "i:1", "i:2"]),
            ("pack", ["o:1", "i:2"]),
            o2o:
            ("o:1", "i:1")
        ];

        assert_eq!(ocel.events.len(), 2);
        assert_eq!(ocel.objects.len(), 4);
        assert_eq!(ocel.event_types.len(), 2);
        assert_eq!(
            ocel.object_type_names().collect::<Vec<_>>(),
            vec!["c", "i", "o"]
        );
        assert!(ocel.events[0].time < ocel.events[1].time);
        assert_eq!(ocel.events[1].id, "ev:2");

        let order = ocel.objects.iter().find(|o| o.id == "o:1").unwrap();
        assert_eq!(order.relationships.len(), 1);
        assert_eq!(order.relationships[0].object_id, "i:1");
    }
}
