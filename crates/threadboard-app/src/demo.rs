// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Sender, ThreadId, ThreadRecord};

struct DemoThread {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    subject: &'static str,
    preview: &'static str,
    summary: &'static str,
    message_count: u32,
    last_activity: &'static str,
    is_unread: bool,
    is_important: bool,
    is_starred: bool,
}

const DEMO_THREADS: [DemoThread; 5] = [
    DemoThread {
        id: "1",
        name: "Sarah Johnson",
        email: "sarah.johnson@company.com",
        subject: "Q4 Budget Review Meeting - Action Items",
        preview: "Hi team, Following up on yesterday's budget meeting. We need to review the proposed allocations for Q4 and finalize the department budgets by Friday...",
        summary: "Budget meeting follow-up with Q4 allocation review deadline Friday. Action items include finalizing department budgets and reviewing proposed spending.",
        message_count: 5,
        last_activity: "2 hours ago",
        is_unread: true,
        is_important: true,
        is_starred: false,
    },
    DemoThread {
        id: "2",
        name: "Marcus Chen",
        email: "marcus.chen@techcorp.com",
        subject: "Project Alpha - Technical Requirements Update",
        preview: "Hey there! I've updated the technical requirements document for Project Alpha. Could you review the new API specifications and database schema changes?",
        summary: "Technical requirements updated for Project Alpha. Review needed for new API specs and database schema modifications.",
        message_count: 3,
        last_activity: "4 hours ago",
        is_unread: true,
        is_important: false,
        is_starred: true,
    },
    DemoThread {
        id: "3",
        name: "Emily Rodriguez",
        email: "emily.r@marketing.co",
        subject: "Campaign Performance Report - September",
        preview: "Good morning! Here's the detailed performance report for our September marketing campaigns. Overall, we saw a 15% increase in engagement rates...",
        summary: "September marketing campaign results showing 15% engagement increase. Detailed performance metrics and recommendations for October campaigns included.",
        message_count: 2,
        last_activity: "6 hours ago",
        is_unread: false,
        is_important: false,
        is_starred: false,
    },
    DemoThread {
        id: "4",
        name: "David Park",
        email: "d.park@hr.company.com",
        subject: "Annual Performance Review Schedule",
        preview: "Hi everyone, We're starting to schedule annual performance reviews for Q4. Please check your calendar availability and let me know your preferred time slots...",
        summary: "Q4 performance review scheduling. Need to confirm calendar availability and preferred time slots for annual reviews.",
        message_count: 1,
        last_activity: "1 day ago",
        is_unread: false,
        is_important: true,
        is_starred: false,
    },
    DemoThread {
        id: "5",
        name: "Lisa Thompson",
        email: "lisa.thompson@vendor.com",
        subject: "Invoice #INV-2024-0892 - Payment Due",
        preview: "Dear valued customer, This is a friendly reminder that Invoice #INV-2024-0892 for $2,450.00 is due on October 15th. Please process payment at your earliest convenience...",
        summary: "Payment reminder for invoice INV-2024-0892 ($2,450) due October 15th. Includes payment instructions and contact info for questions.",
        message_count: 1,
        last_activity: "2 days ago",
        is_unread: false,
        is_important: false,
        is_starred: false,
    },
];

/// The built-in five-thread collection used when no source is configured.
pub fn demo_threads() -> Vec<ThreadRecord> {
    DEMO_THREADS
        .iter()
        .map(|thread| ThreadRecord {
            id: ThreadId::new(thread.id),
            sender: Sender {
                name: thread.name.to_owned(),
                email: thread.email.to_owned(),
                avatar: None,
            },
            subject: thread.subject.to_owned(),
            preview: thread.preview.to_owned(),
            summary: thread.summary.to_owned(),
            message_count: thread.message_count,
            last_activity: thread.last_activity.to_owned(),
            is_unread: thread.is_unread,
            is_important: thread.is_important,
            is_starred: thread.is_starred,
        })
        .collect()
}
