//! Top-level record fields of each stream

use crate::schema::FieldType::{self, Boolean, Date, Integer, Number, Object, String};

pub(super) const OFFERS: &[(&str, FieldType)] = &[
    ("network_offer_id", Integer),
    ("network_id", Integer),
    ("network_advertiser_id", Integer),
    ("network_offer_group_id", Integer),
    ("name", String),
    ("thumbnail_url", String),
    ("network_category_id", Integer),
    ("internal_notes", String),
    ("destination_url", String),
    ("server_side_url", String),
    ("is_view_through_enabled", Boolean),
    ("view_through_destination_url", String),
    ("preview_url", String),
    ("offer_status", String),
    ("currency_id", String),
    ("caps_timezone_id", Integer),
    ("project_id", String),
    ("date_live_until", Date),
    ("html_description", String),
    ("is_using_explicit_terms_and_conditions", Boolean),
    ("terms_and_conditions", String),
    ("is_force_terms_and_conditions", Boolean),
    ("is_caps_enabled", Boolean),
    ("daily_conversion_cap", Integer),
    ("weekly_conversion_cap", Integer),
    ("monthly_conversion_cap", Integer),
    ("global_conversion_cap", Integer),
    ("daily_payout_cap", Integer),
    ("weekly_payout_cap", Integer),
    ("monthly_payout_cap", Integer),
    ("global_payout_cap", Integer),
    ("daily_revenue_cap", Integer),
    ("weekly_revenue_cap", Integer),
    ("monthly_revenue_cap", Integer),
    ("global_revenue_cap", Integer),
    ("daily_click_cap", Integer),
    ("weekly_click_cap", Integer),
    ("monthly_click_cap", Integer),
    ("global_click_cap", Integer),
    ("redirect_mode", String),
    ("is_using_suppression_list", Boolean),
    ("suppression_list_id", Integer),
    ("is_must_approve_conversion", Boolean),
    ("is_allow_duplicate_conversion", Boolean),
    ("is_duplicate_filter_enabled", Boolean),
    ("duplicate_filter_targeting_action", String),
    ("network_tracking_domain_id", Integer),
    ("is_use_secure_link", Boolean),
    ("is_seo_friendly", Boolean),
    ("is_allow_deep_link", Boolean),
    ("is_session_tracking_enabled", Boolean),
    ("session_tracking_start_on", String),
    ("session_tracking_lifespan_hour", Integer),
    ("session_tracking_minimum_lifespan_second", Integer),
    ("is_view_through_session_tracking_enabled", Boolean),
    ("view_through_session_tracking_lifespan_minute", Integer),
    ("view_through_session_tracking_minimal_lifespan_second", Integer),
    ("is_block_already_converted", Boolean),
    ("already_converted_action", String),
    ("is_fail_traffic_enabled", Boolean),
    ("redirect_routing_method", String),
    ("redirect_internal_routing_type", String),
    ("visibility", String),
    ("time_created", Integer),
    ("time_saved", Integer),
    ("conversion_method", String),
    ("is_whitelist_check_enabled", Boolean),
    ("is_use_scrub_rate", Boolean),
    ("scrub_rate_status", String),
    ("scrub_rate_percentage", Integer),
    ("session_definition", String),
    ("session_duration", Integer),
    ("app_identifier", String),
    ("is_description_plain_text", Boolean),
    ("is_use_direct_linking", Boolean),
    ("relationship", Object),
    ("is_email_attribution_enabled", Boolean),
    ("email_attribution_method", String),
    ("attribution_method", String),
    ("is_email_attribution_window_enabled", Boolean),
    ("email_attribution_window_minute", Integer),
    ("email_attribution_window_type", String),
    ("is_soft_cap", Boolean),
];

pub(super) const CONVERSIONS: &[(&str, FieldType)] = &[
    ("conversion_id", String),
    ("conversion_unix_timestamp", Integer),
    ("sub1", String),
    ("sub2", String),
    ("sub3", String),
    ("sub4", String),
    ("sub5", String),
    ("source_id", String),
    ("status", String),
    ("payout_type", String),
    ("revenue_type", String),
    ("payout", Integer),
    ("revenue", Integer),
    ("session_user_ip", String),
    ("conversion_user_ip", String),
    ("country", String),
    ("region", String),
    ("city", String),
    ("dma", Integer),
    ("carrier", String),
    ("platform", String),
    ("os_version", String),
    ("device_type", String),
    ("device_model", String),
    ("brand", String),
    ("browser", String),
    ("language", String),
    ("http_user_agent", String),
    ("adv1", String),
    ("adv2", String),
    ("adv3", String),
    ("adv4", String),
    ("adv5", String),
    ("is_event", Boolean),
    ("event", String),
    ("notes", String),
    ("transaction_id", String),
    ("click_unix_timestamp", Integer),
    ("error_code", Integer),
    ("error_message", String),
    ("sale_amount", Integer),
    ("is_scrub", Boolean),
    ("coupon_code", String),
    ("order_id", String),
    ("url", String),
    ("isp", String),
    ("referer", String),
    ("app_id", String),
    ("idfa", String),
    ("idfa_md5", String),
    ("idfa_sha1", String),
    ("google_ad_id", String),
    ("google_ad_id_md5", String),
    ("google_ad_id_sha1", String),
    ("android_id", String),
    ("android_id_md5", String),
    ("android_id_sha1", String),
    ("currency_id", String),
    ("email", String),
    ("is_view_through", Boolean),
    ("previous_network_offer_id", Integer),
    ("relationship", Object),
    ("network_offer_payout_revenue_id", Integer),
];

pub(super) const CLICKS: &[(&str, FieldType)] = &[
    ("transaction_id", String),
    ("is_unique", Integer),
    ("unix_timestamp", Integer),
    ("tracking_url", String),
    ("source_id", String),
    ("sub1", String),
    ("sub2", String),
    ("sub3", String),
    ("sub4", String),
    ("sub5", String),
    ("payout_type", String),
    ("revenue_type", String),
    ("payout", Number),
    ("revenue", Number),
    ("referer", String),
    ("previous_network_offer_id", Integer),
    ("error_code", Integer),
    ("project_id", String),
    ("user_ip", String),
    ("error_message", String),
    ("url", String),
    ("is_view_through", Boolean),
    ("is_async", Boolean),
    ("server_side_url", String),
    ("server_side_output", String),
    ("custom_landing_page_id", Integer),
    ("is_test_mode", Boolean),
    ("idfa", String),
    ("idfa_md5", String),
    ("idfa_sha1", String),
    ("google_ad_id", String),
    ("google_ad_id_md5", String),
    ("google_ad_id_sha1", String),
    ("android_id", String),
    ("android_id_md5", String),
    ("android_id_sha1", String),
    ("error_filter_id", String),
    ("has_conversion", Boolean),
    ("is_pass_through", Boolean),
    ("creative_id", Integer),
    ("relationship", Object),
    ("coupon_code", String),
    ("redirect_method", String),
    ("is_sdk_click", Boolean),
    ("category_id", Integer),
    ("currency_id", String),
];
