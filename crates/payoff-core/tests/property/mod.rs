mod schedule_properties;
