// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod console_sink;
pub mod group_tree;
pub mod inputs;
