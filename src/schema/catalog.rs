//! Compiled-in Alloy component catalog
//!
//! Every `block(..)` entry below must have a matching identity in [`BLOCKS`];
//! `unregistered_block_references` is asserted empty in the tests.

use super::{CompletionItem, CompletionKind, InsertTemplate, SchemaError, SchemaRegistry, TOP_LEVEL};

struct ItemSpec {
    label: &'static str,
    kind: CompletionKind,
    template: &'static str,
    documentation: &'static str,
    detail: &'static str,
}

impl ItemSpec {
    fn to_item(&self, identity: &str) -> Result<CompletionItem, SchemaError> {
        let template =
            InsertTemplate::parse(self.template).map_err(|source| SchemaError::InvalidTemplate {
                identity: identity.to_string(),
                label: self.label.to_string(),
                source,
            })?;
        Ok(CompletionItem::new(self.label, self.kind, template)
            .with_documentation(self.documentation)
            .with_detail(self.detail))
    }
}

const fn component(
    label: &'static str,
    template: &'static str,
    documentation: &'static str,
) -> ItemSpec {
    ItemSpec {
        label,
        kind: CompletionKind::Component,
        template,
        documentation,
        detail: "",
    }
}

const fn property(
    label: &'static str,
    template: &'static str,
    documentation: &'static str,
    detail: &'static str,
) -> ItemSpec {
    ItemSpec {
        label,
        kind: CompletionKind::Property,
        template,
        documentation,
        detail,
    }
}

const fn block(
    label: &'static str,
    template: &'static str,
    documentation: &'static str,
    detail: &'static str,
) -> ItemSpec {
    ItemSpec {
        label,
        kind: CompletionKind::Block,
        template,
        documentation,
        detail,
    }
}

/// Builds the registry from the static tables.
pub(super) fn builtin_registry() -> Result<SchemaRegistry, SchemaError> {
    let top_level = build_items(TOP_LEVEL, COMPONENTS)?;
    let mut builder = SchemaRegistry::builder().top_level_items(top_level);
    for (identity, specs) in BLOCKS {
        builder = builder.block(*identity, build_items(identity, specs)?);
    }
    builder.build()
}

fn build_items(identity: &str, specs: &[ItemSpec]) -> Result<Vec<CompletionItem>, SchemaError> {
    specs
        .iter()
        .map(|spec| {
            let item = spec.to_item(identity)?;
            // Component details are derived from the label
            if spec.kind == CompletionKind::Component {
                let detail = format!("{} \"label\" {{ ... }}", spec.label);
                return Ok(item.with_detail(detail));
            }
            Ok(item)
        })
        .collect()
}

const TLS_CONFIG_FULL: &str = r#"tls_config {
  ca_pem_file = "${1:path/to/ca.pem}"
  cert_pem_file = "${2:path/to/cert.pem}"
  key_pem_file = "${3:path/to/key.pem}"
  insecure_skip_verify = ${4|true,false|}
}"#;

const OUTPUT_ALL_SIGNALS: &str = r#"output {
  metrics_receiver = [${1:/* receiver */}]
  logs_receiver = [${2:/* receiver */}]
  traces_receiver = [${3:/* receiver */}]
}"#;

static COMPONENTS: &[ItemSpec] = &[
    component(
        "prometheus.scrape",
        r#"prometheus.scrape "${1:my_scraper}" {
  targets = [
    {
      __address__ = "${2:localhost:9090}"
    }
  ]
  forward_to = [${3:/* other.component.label.receiver */}]
}"#,
        "Scrapes metrics from Prometheus targets.",
    ),
    component(
        "prometheus.remote_write",
        r#"prometheus.remote_write "${1:my_remote_write}" {
  endpoint {
    url = "${2:http://localhost:9090/api/v1/write}"
  }
}"#,
        "Sends metrics to a Prometheus remote_write endpoint.",
    ),
    component(
        "loki.write",
        r#"loki.write "${1:my_loki_writer}" {
  endpoint {
    url = "${2:http://localhost:3100/loki/api/v1/push}"
  }
  connection_timeout = "${3:1m}"
}"#,
        "Sends log entries to Loki.",
    ),
    component(
        "loki.source.file",
        r#"loki.source.file "${1:my_file_source}" {
  targets = [
    {
      __path__ = "${2:/var/log/*.log}"
      job = "${3:mylogs}"
    }
  ]
  forward_to = [${4:/* other.component.label.receiver */}]
}"#,
        "Reads log entries from local files and forwards them to Loki receivers.",
    ),
    component(
        "otelcol.receiver.otlp",
        r#"otelcol.receiver.otlp "${1:my_otlp_receiver}" {
  http {
    endpoint = "${2:0.0.0.0:4318}"
  }
  grpc {
    endpoint = "${3:0.0.0.0:4317}"
  }
  output {
    metrics_receiver = [${4:/* otelcol.processor.batch.metrics.receiver */}]
    logs_receiver = [${5:/* otelcol.processor.batch.logs.receiver */}]
    traces_receiver = [${6:/* otelcol.processor.batch.traces.receiver */}]
  }
}"#,
        "Receives metrics, logs and traces over OTLP.",
    ),
    component(
        "otelcol.processor.batch",
        r#"otelcol.processor.batch "${1:my_batch_processor}" {
  output {
    metrics_receiver = [${2:/* otelcol.exporter.otlp.metrics.receiver */}]
    logs_receiver = [${3:/* otelcol.exporter.otlp.logs.receiver */}]
    traces_receiver = [${4:/* otelcol.exporter.otlp.traces.receiver */}]
  }
}"#,
        "Batches telemetry data before it is sent downstream.",
    ),
    component(
        "otelcol.exporter.otlp",
        r#"otelcol.exporter.otlp "${1:my_otlp_exporter}" {
  client {
    endpoint = "${2:localhost:4317}"
  }
}"#,
        "Exports telemetry data to an OTLP endpoint.",
    ),
    component(
        "otelcol.exporter.prometheus",
        r#"otelcol.exporter.prometheus "${1:my_prom_exporter}" {
  output {
    metrics_receiver = [${2:/* prometheus.remote_write.my_remote_write.receiver */}]
  }
}"#,
        "Converts OpenTelemetry metrics to Prometheus format.",
    ),
    component(
        "discovery.kubernetes",
        r#"discovery.kubernetes "${1:my_k8s_discovery}" {
  selectors {
    role = "${2|node,pod,endpoint,service,ingress,container|}"
  }
  forward_to = [${3:/* prometheus.scrape.my_scraper.targets */}]
}"#,
        "Discovers targets in a Kubernetes cluster.",
    ),
    component(
        "local.file_match",
        r#"local.file_match "${1:my_file_matcher}" {
  path_targets = [
    {
      __path__ = "${2:/var/log/*.log}"
      component_id = "${3:my_loki_source}" // ID of the loki.source.file component
    }
  ]
}"#,
        "Discovers files on the local filesystem using glob patterns.",
    ),
    component(
        "otelcol.processor.resource",
        r#"otelcol.processor.resource "${1:add_service_name}" {
  attributes {
    service.name = "${2:my-application}"
  }
}"#,
        "Adds or modifies resource attributes on OpenTelemetry data.",
    ),
    component(
        "otelcol.processor.attributes",
        r#"otelcol.processor.attributes "${1:add_environment}" {
  actions {
    action = "${2|insert,update,upsert,delete,hash,extract|}"
    key = "${3:environment}"
    value = "${4:production}"
  }
}"#,
        "Inserts, updates or deletes attributes on spans, metrics and logs.",
    ),
    component(
        "otelcol.processor.transform",
        r#"otelcol.processor.transform "${1:transform_logs}" {
  log_statements {
    context = "${2|log,resource,scope|}"
    statements = [
      "set(body, \"transformed_log\") where body == \"old_log\"",
      "set(attributes[\"new_attr\"], \"new_value\")",
    ]
  }
}"#,
        "Transforms telemetry data with the OpenTelemetry Transformation Language (OTTL).",
    ),
    component(
        "prometheus.exporter.unix",
        r#"prometheus.exporter.unix "${1:node_exporter}" {
  // No arguments are needed for basic usage
}"#,
        "Exposes host operating system metrics, equivalent to node_exporter.",
    ),
    component(
        "prometheus.integration.node_exporter",
        r#"prometheus.integration.node_exporter "${1:my_node_integration}" {
  // disable_collectors = ["diskstats"]
}"#,
        "Node Exporter integration collecting host system metrics.",
    ),
    component(
        "prometheus.integration.agent_exporter",
        r#"prometheus.integration.agent_exporter "${1:agent_metrics}" {
  // Exposes internal Alloy metrics
}"#,
        "Exposes the internal metrics of Grafana Alloy itself.",
    ),
    component(
        "loki.process",
        r#"loki.process "${1:log_processor}" {
  forward_to = [${2:/* loki.write.my_loki_writer.receiver */}]
  stage {
    json {
      expressions = {
        message = "message",
        level = "level",
      }
    }
  }
  stage {
    labels {
      level = null
    }
  }
}"#,
        "Processes Loki log entries through a pipeline of stages.",
    ),
    component(
        "loki.relabel",
        r#"loki.relabel "${1:log_relabeler}" {
  forward_to = [${2:/* loki.write.my_loki_writer.receiver */}]
  rule {
    source_labels = ["${3:filename}"]
    regex = "${4:(.*)}"
    target_label = "${5:path}"
    action = "${6|replace,keep,drop,labelmap,labeldrop,labelkeep|}"
  }
}"#,
        "Applies relabeling rules to Loki log streams.",
    ),
    component(
        "otelcol.exporter.loki",
        r#"otelcol.exporter.loki "${1:my_otlp_loki_exporter}" {
  client {
    endpoint = "${2:http://localhost:3100/loki/api/v1/push}"
  }
}"#,
        "Exports OpenTelemetry logs to Loki.",
    ),
    component(
        "otelcol.exporter.prometheus_remote_write",
        r#"otelcol.exporter.prometheus_remote_write "${1:my_otlp_prom_remote_write_exporter}" {
  client {
    endpoint = "${2:http://localhost:9090/api/v1/write}"
  }
}"#,
        "Exports OpenTelemetry metrics to a Prometheus remote_write endpoint.",
    ),
];

static BLOCKS: &[(&str, &[ItemSpec])] = &[
    // Component arguments
    (
        "prometheus.scrape",
        &[
            property(
                "targets",
                r#"targets = [
  {
    __address__ = "${1:localhost:9090}"
  },
]"#,
                "List of targets to scrape metrics from.",
                "list(map(string)) - required",
            ),
            property(
                "forward_to",
                "forward_to = [${1:/* other.component.label.export_name */}]",
                "Receivers to send scraped metrics to.",
                "list(MetricsReceiver) - required",
            ),
            property(
                "bearer_token",
                r#"bearer_token = "${1:your_token}""#,
                "Bearer token used for authentication.",
                "secret - optional",
            ),
            property(
                "interval",
                r#"interval = "${1:1m}""#,
                "How often targets are scraped.",
                "duration - optional (default: 1m)",
            ),
            property(
                "honor_labels",
                "honor_labels = ${1|true,false|}",
                "Keep labels from the scraped target when they conflict with server labels.",
                "bool - optional (default: false)",
            ),
            property(
                "job_name",
                r#"job_name = "${1:my-job}""#,
                "Value of the job label on scraped metrics.",
                "string - optional",
            ),
            property(
                "metric_relabel_configs",
                r#"metric_relabel_configs = [
  {
    source_labels = ["${1:__name__}"],
    regex = "${2:.*}",
    action = "${3|replace,keep,drop,hashmod,labelmap,labeldrop,labelkeep|}",
  },
]"#,
                "Relabeling rules applied to metrics before ingestion.",
                "list(relabel_config) - optional",
            ),
            block(
                "tls_config",
                TLS_CONFIG_FULL,
                "TLS settings for scrape connections.",
                "tls_config - optional",
            ),
        ],
    ),
    (
        "prometheus.remote_write",
        &[
            block(
                "endpoint",
                r#"endpoint {
  url = "${1:http://localhost:9090/api/v1/write}"
  remote_timeout = "${2:30s}"
}"#,
                "Remote endpoint to send metrics to.",
                "endpoint_options - required",
            ),
            property(
                "wal_directory",
                r#"wal_directory = "${1:/tmp/agent-wal}""#,
                "Directory for the write-ahead log.",
                "string - optional",
            ),
        ],
    ),
    (
        "loki.write",
        &[
            block(
                "endpoint",
                r#"endpoint {
  url = "${1:http://localhost:3100/loki/api/v1/push}"
  bearer_token = "${2:your_token}"
}"#,
                "Loki endpoint to push log entries to.",
                "endpoint_options - required",
            ),
            property(
                "connection_timeout",
                r#"connection_timeout = "${1:1m}""#,
                "Maximum time to wait while establishing a connection.",
                "duration - optional (default: 1m)",
            ),
        ],
    ),
    (
        "loki.source.file",
        &[
            property(
                "targets",
                r#"targets = [
  {
    __path__ = "${1:/var/log/*.log}",
    job = "${2:mylogs}",
  },
]"#,
                "Files to tail.",
                "list(map(string)) - required",
            ),
            property(
                "forward_to",
                "forward_to = [${1:/* loki.write.my_loki_writer.receiver */}]",
                "Receivers to send log entries to.",
                "list(LogsReceiver) - required",
            ),
            property(
                "polling_interval",
                r#"polling_interval = "${1:1s}""#,
                "How often to check for new files or changes.",
                "duration - optional (default: 1s)",
            ),
        ],
    ),
    (
        "otelcol.receiver.otlp",
        &[
            block(
                "http",
                r#"http {
  endpoint = "${1:0.0.0.0:4318}"
}"#,
                "Configures the OTLP HTTP server.",
                "http_server_config - optional",
            ),
            block(
                "grpc",
                r#"grpc {
  endpoint = "${1:0.0.0.0:4317}"
}"#,
                "Configures the OTLP gRPC server.",
                "grpc_server_config - optional",
            ),
            block(
                "output",
                OUTPUT_ALL_SIGNALS,
                "Receivers for metrics, logs and traces.",
                "output_config - required",
            ),
        ],
    ),
    (
        "otelcol.processor.batch",
        &[
            block(
                "output",
                OUTPUT_ALL_SIGNALS,
                "Receivers for batched metrics, logs and traces.",
                "output_config - required",
            ),
            property(
                "timeout",
                r#"timeout = "${1:5s}""#,
                "Maximum time to wait before sending a batch.",
                "duration - optional (default: 5s)",
            ),
            property(
                "send_batch_size",
                "send_batch_size = ${1:1000}",
                "Number of items that triggers sending a batch.",
                "number - optional (default: 1000)",
            ),
        ],
    ),
    (
        "otelcol.exporter.otlp",
        &[block(
            "client",
            r#"client {
  endpoint = "${1:localhost:4317}"
  tls_config {
    insecure_skip_verify = ${2|true,false|}
  }
}"#,
            "OTLP client settings.",
            "client_config - required",
        )],
    ),
    (
        "otelcol.exporter.prometheus",
        &[block(
            "output",
            r#"output {
  metrics_receiver = [${1:/* receiver */}]
}"#,
            "Receivers for the converted metrics.",
            "output_config - required",
        )],
    ),
    (
        "discovery.kubernetes",
        &[
            block(
                "selectors",
                r#"selectors {
  role = "${1|node,pod,endpoint,service,ingress,container|}"
}"#,
                "Filters the Kubernetes resources to discover.",
                "selectors_config - optional",
            ),
            property(
                "kubeconfig_file",
                r#"kubeconfig_file = "${1:/etc/kubernetes/kubeconfig.yaml}""#,
                "Path to a kubeconfig file.",
                "string - optional",
            ),
            property(
                "forward_to",
                "forward_to = [${1:/* prometheus.scrape.my_scraper.targets */}]",
                "Receivers for discovered targets.",
                "list(TargetsReceiver) - required",
            ),
        ],
    ),
    (
        "local.file_match",
        &[property(
            "path_targets",
            r#"path_targets = [
  {
    __path__ = "${1:/var/log/*.log}",
    component_id = "${2:my_loki_source}",
  },
]"#,
            "File path patterns to match and the components they belong to.",
            "list(map(string)) - required",
        )],
    ),
    (
        "otelcol.processor.resource",
        &[block(
            "attributes",
            r#"attributes {
  service.name = "${1:my-application}"
  host.name = "${2:my-host}"
}"#,
            "Resource attributes to add or modify.",
            "attributes_config - required",
        )],
    ),
    (
        "otelcol.processor.attributes",
        &[block(
            "actions",
            r#"actions {
  action = "${1|insert,update,upsert,delete,hash,extract|}"
  key = "${2:environment}"
  value = "${3:production}"
}"#,
            "Actions that manipulate attributes.",
            "list(action_config) - required",
        )],
    ),
    (
        "otelcol.processor.transform",
        &[
            block(
                "log_statements",
                r#"log_statements {
  context = "${1|log,resource,scope|}"
  statements = [
    "set(body, \"transformed_log\") where body == \"old_log\"",
    "set(attributes[\"new_attr\"], \"new_value\")",
  ]
}"#,
                "OTTL statements applied to logs.",
                "log_statements_config - optional",
            ),
            block(
                "metric_statements",
                r#"metric_statements {
  context = "${1|metric,resource,scope,datapoint|}"
  statements = [
    "set(attributes[\"new_metric_attr\"], \"new_value\")",
  ]
}"#,
                "OTTL statements applied to metrics.",
                "metric_statements_config - optional",
            ),
            block(
                "trace_statements",
                r#"trace_statements {
  context = "${1|span,resource,scope|}"
  statements = [
    "set(attributes[\"new_trace_attr\"], \"new_value\")",
  ]
}"#,
                "OTTL statements applied to traces.",
                "trace_statements_config - optional",
            ),
        ],
    ),
    (
        "prometheus.exporter.unix",
        &[
            property(
                "set_collectors",
                r#"set_collectors = ["${1:cpu}"]"#,
                "Overrides the default set of enabled collectors.",
                "list(string) - optional",
            ),
            property(
                "enable_collectors",
                r#"enable_collectors = ["${1:systemd}"]"#,
                "Collectors to enable in addition to the defaults.",
                "list(string) - optional",
            ),
            property(
                "disable_collectors",
                r#"disable_collectors = ["${1:diskstats}"]"#,
                "Collectors to disable.",
                "list(string) - optional",
            ),
            property(
                "include_exporter_metrics",
                "include_exporter_metrics = ${1|false,true|}",
                "Also expose metrics about the exporter itself.",
                "bool - optional (default: false)",
            ),
        ],
    ),
    (
        "prometheus.integration.node_exporter",
        &[
            property(
                "enable_collectors",
                r#"enable_collectors = ["${1:systemd}"]"#,
                "Collectors to enable in addition to the defaults.",
                "list(string) - optional",
            ),
            property(
                "disable_collectors",
                r#"disable_collectors = ["${1:diskstats}"]"#,
                "Collectors to disable.",
                "list(string) - optional",
            ),
        ],
    ),
    // Takes no arguments
    ("prometheus.integration.agent_exporter", &[]),
    (
        "loki.process",
        &[
            property(
                "forward_to",
                "forward_to = [${1:/* loki.write.my_loki_writer.receiver */}]",
                "Receivers for processed log entries.",
                "list(LogsReceiver) - required",
            ),
            block(
                "stage",
                r#"stage {
  ${1:json} {
  }
}"#,
                "One step of the processing pipeline.",
                "stage - optional",
            ),
        ],
    ),
    (
        "loki.relabel",
        &[
            property(
                "forward_to",
                "forward_to = [${1:/* loki.write.my_loki_writer.receiver */}]",
                "Receivers for relabeled log entries.",
                "list(LogsReceiver) - required",
            ),
            block(
                "rule",
                r#"rule {
  source_labels = ["${1:filename}"]
  regex = "${2:(.*)}"
  target_label = "${3:path}"
  action = "${4|replace,keep,drop,labelmap,labeldrop,labelkeep|}"
}"#,
                "A relabeling rule.",
                "rule - optional",
            ),
            property(
                "max_cache_size",
                "max_cache_size = ${1:10000}",
                "Maximum number of entries in the relabeling cache.",
                "number - optional (default: 10000)",
            ),
        ],
    ),
    (
        "otelcol.exporter.loki",
        &[block(
            "client",
            r#"client {
  endpoint = "${1:http://localhost:3100/loki/api/v1/push}"
}"#,
            "Loki client settings.",
            "client_config - required",
        )],
    ),
    (
        "otelcol.exporter.prometheus_remote_write",
        &[block(
            "client",
            r#"client {
  endpoint = "${1:http://localhost:9090/api/v1/write}"
}"#,
            "Remote write client settings.",
            "client_config - required",
        )],
    ),
    // Nested blocks
    (
        "endpoint",
        &[
            property(
                "url",
                r#"url = "${1:http://localhost:9090/}""#,
                "Endpoint URL.",
                "string - required",
            ),
            property(
                "bearer_token",
                r#"bearer_token = "${1:your_token}""#,
                "Bearer token used for authentication.",
                "secret - optional",
            ),
            block(
                "basic_auth",
                r#"basic_auth {
  username = "${1:user}"
  password = "${2:password}"
}"#,
                "HTTP basic authentication credentials.",
                "basic_auth_config - optional",
            ),
            block(
                "tls_config",
                TLS_CONFIG_FULL,
                "TLS settings for the endpoint connection.",
                "tls_config - optional",
            ),
            property(
                "remote_timeout",
                r#"remote_timeout = "${1:30s}""#,
                "Timeout for requests to the remote endpoint.",
                "duration - optional (default: 30s)",
            ),
        ],
    ),
    (
        "basic_auth",
        &[
            property(
                "username",
                r#"username = "${1:user}""#,
                "Basic authentication username.",
                "string - optional",
            ),
            property(
                "password",
                r#"password = "${1:password}""#,
                "Basic authentication password.",
                "secret - optional",
            ),
            property(
                "password_file",
                r#"password_file = "${1:/etc/secrets/password}""#,
                "File containing the basic authentication password.",
                "string - optional",
            ),
        ],
    ),
    (
        "tls_config",
        &[
            property(
                "ca_pem_file",
                r#"ca_pem_file = "${1:path/to/ca.pem}""#,
                "Path to the CA certificate PEM file.",
                "string - optional",
            ),
            property(
                "cert_pem_file",
                r#"cert_pem_file = "${1:path/to/cert.pem}""#,
                "Path to the client certificate PEM file.",
                "string - optional",
            ),
            property(
                "key_pem_file",
                r#"key_pem_file = "${1:path/to/key.pem}""#,
                "Path to the client key PEM file.",
                "string - optional",
            ),
            property(
                "insecure_skip_verify",
                "insecure_skip_verify = ${1|true,false|}",
                "Skip verification of the server certificate.",
                "bool - optional (default: false)",
            ),
        ],
    ),
    (
        "http",
        &[
            property(
                "endpoint",
                r#"endpoint = "${1:0.0.0.0:4318}""#,
                "Address the HTTP server listens on.",
                "string - optional (default: 0.0.0.0:4318)",
            ),
            property(
                "cors_allowed_headers",
                r#"cors_allowed_headers = ["${1:X-Something}"]"#,
                "Headers allowed in CORS requests.",
                "list(string) - optional",
            ),
        ],
    ),
    (
        "grpc",
        &[
            property(
                "endpoint",
                r#"endpoint = "${1:0.0.0.0:4317}""#,
                "Address the gRPC server listens on.",
                "string - optional (default: 0.0.0.0:4317)",
            ),
            property(
                "max_recv_msg_size_mib",
                "max_recv_msg_size_mib = ${1:100}",
                "Maximum size of a received message in MiB.",
                "number - optional (default: 100)",
            ),
        ],
    ),
    (
        "output",
        &[
            property(
                "metrics_receiver",
                "metrics_receiver = [${1:/* receiver */}]",
                "Receivers for metrics.",
                "list(MetricsReceiver) - optional",
            ),
            property(
                "logs_receiver",
                "logs_receiver = [${1:/* receiver */}]",
                "Receivers for logs.",
                "list(LogsReceiver) - optional",
            ),
            property(
                "traces_receiver",
                "traces_receiver = [${1:/* receiver */}]",
                "Receivers for traces.",
                "list(TracesReceiver) - optional",
            ),
        ],
    ),
    (
        "client",
        &[
            property(
                "endpoint",
                r#"endpoint = "${1:localhost:4317}""#,
                "Address of the server to send data to.",
                "string - required",
            ),
            block(
                "tls_config",
                r#"tls_config {
  insecure_skip_verify = ${1|true,false|}
}"#,
                "TLS settings for the client.",
                "tls_config - optional",
            ),
            property(
                "compression",
                r#"compression = "${1|gzip,zlib,none|}""#,
                "Compression applied to outgoing requests.",
                "string - optional (default: none)",
            ),
        ],
    ),
    (
        "selectors",
        &[
            property(
                "role",
                r#"role = "${1|node,pod,endpoint,service,ingress,container|}""#,
                "Kubernetes resource role to discover.",
                "string - required",
            ),
            property(
                "label_selector",
                r#"label_selector = "${1:app=my-app,environment=production}""#,
                "Kubernetes label selector.",
                "string - optional",
            ),
        ],
    ),
    (
        "attributes",
        &[
            property(
                "service.name",
                r#"service.name = "${1:my-application}""#,
                "Service name.",
                "string - optional",
            ),
            property(
                "host.name",
                r#"host.name = "${1:my-host}""#,
                "Host name.",
                "string - optional",
            ),
            property(
                "environment",
                r#"environment = "${1:production}""#,
                "Deployment environment.",
                "string - optional",
            ),
        ],
    ),
    (
        "actions",
        &[
            property(
                "action",
                r#"action = "${1|insert,update,upsert,delete,hash,extract|}""#,
                "Kind of action to perform.",
                "string - required",
            ),
            property(
                "key",
                r#"key = "${1:my_attribute}""#,
                "Attribute key.",
                "string - required",
            ),
            property(
                "value",
                r#"value = "${1:my_value}""#,
                "Attribute value.",
                "string - optional (required for insert, update, upsert)",
            ),
            property(
                "from_attribute",
                r#"from_attribute = "${1:source_attribute}""#,
                "Attribute to copy the value from.",
                "string - optional (used with insert or update)",
            ),
        ],
    ),
    (
        "log_statements",
        &[
            property(
                "context",
                r#"context = "${1|log,resource,scope|}""#,
                "OTTL context the statements run in.",
                "string - required",
            ),
            property(
                "statements",
                r#"statements = [
  "${1:set(body, \"new_body\") where body == \"old_body\"}",
  "${2:set(attributes[\"my_attr\"], \"my_value\")}",
]"#,
                "OTTL statements.",
                "list(string) - required",
            ),
        ],
    ),
    (
        "metric_statements",
        &[
            property(
                "context",
                r#"context = "${1|metric,resource,scope,datapoint|}""#,
                "OTTL context the statements run in.",
                "string - required",
            ),
            property(
                "statements",
                r#"statements = [
  "${1:set(attributes[\"my_attr\"], \"my_value\")}",
]"#,
                "OTTL statements.",
                "list(string) - required",
            ),
        ],
    ),
    (
        "trace_statements",
        &[
            property(
                "context",
                r#"context = "${1|span,resource,scope|}""#,
                "OTTL context the statements run in.",
                "string - required",
            ),
            property(
                "statements",
                r#"statements = [
  "${1:set(attributes[\"my_attr\"], \"my_value\")}",
]"#,
                "OTTL statements.",
                "list(string) - required",
            ),
        ],
    ),
    (
        "stage",
        &[
            block(
                "json",
                r#"json {
  expressions = {
    "${1:field_name}" = "${2:target_label}",
  }
}"#,
                "Extracts fields from a JSON log line.",
                "json_stage_config - optional",
            ),
            block(
                "regex",
                r#"regex {
  expression = "${1:^(?P<level>\S+) (?P<message>.*)$}"
}"#,
                "Extracts fields with a regular expression using named capture groups.",
                "regex_stage_config - optional",
            ),
            block(
                "labels",
                r#"labels {
  ${1:label_name} = ${2:null}
}"#,
                "Sets or modifies labels from extracted values.",
                "labels_stage_config - optional",
            ),
            property(
                "output",
                r#"output = "${1:output_value}""#,
                "Extracted field that replaces the log line.",
                "string - optional",
            ),
        ],
    ),
    (
        "json",
        &[
            property(
                "expressions",
                r#"expressions = {
  "${1:field_name}" = "${2:target_label}",
}"#,
                "JMESPath expressions to extract.",
                "map(string) - required",
            ),
            property(
                "drop_field",
                "drop_field = ${1|true,false|}",
                "Remove the extracted field from the log line.",
                "bool - optional (default: false)",
            ),
        ],
    ),
    (
        "regex",
        &[
            property(
                "expression",
                r#"expression = "${1:^(?P<level>\S+) (?P<message>.*)$}""#,
                "RE2 expression with named capture groups.",
                "string - required",
            ),
            property(
                "source",
                r#"source = "${1:message}""#,
                "Extracted field to match against instead of the log line.",
                "string - optional",
            ),
        ],
    ),
    (
        "labels",
        &[property(
            "label_name",
            r#"${1:label_name} = "${2:label_value}""#,
            "A label name and its value, or null to reuse the extracted value of the same name.",
            "string | null",
        )],
    ),
    (
        "rule",
        &[
            property(
                "source_labels",
                r#"source_labels = ["${1:__name__}"]"#,
                "Labels whose values are concatenated and matched.",
                "list(string) - required",
            ),
            property(
                "regex",
                r#"regex = "${1:.*}""#,
                "Regular expression matched against the source value.",
                "string - optional (default: .*)",
            ),
            property(
                "target_label",
                r#"target_label = "${1:new_label}""#,
                "Label written by the rule.",
                "string - optional (required for replace)",
            ),
            property(
                "action",
                r#"action = "${1|replace,keep,drop,hashmod,labelmap,labeldrop,labelkeep|}""#,
                "Relabeling action.",
                "string - required",
            ),
            property(
                "replacement",
                r#"replacement = "${1:\$1}""#,
                "Replacement value; may reference capture groups.",
                "string - optional (default: $1)",
            ),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_builds() {
        let registry = builtin_registry().unwrap();
        assert_eq!(registry.top_level_items().len(), COMPONENTS.len());
        assert_eq!(registry.len(), BLOCKS.len());
    }

    #[test]
    fn test_every_block_item_has_an_entry() {
        let registry = builtin_registry().unwrap();
        let dangling = registry.unregistered_block_references();
        assert!(dangling.is_empty(), "dangling block references: {dangling:?}");
    }

    #[test]
    fn test_every_component_has_an_argument_entry() {
        let registry = builtin_registry().unwrap();
        for item in registry.top_level_items() {
            assert_eq!(item.kind(), CompletionKind::Component);
            assert!(
                registry.contains(item.label()),
                "component {} has no argument entry",
                item.label()
            );
        }
    }

    #[test]
    fn test_component_detail_shows_declaration_shape() {
        let registry = builtin_registry().unwrap();
        let scrape = &registry.top_level_items()[0];
        assert_eq!(scrape.label(), "prometheus.scrape");
        assert_eq!(scrape.detail(), r#"prometheus.scrape "label" { ... }"#);
    }

    #[test]
    fn test_every_item_is_documented() {
        let registry = builtin_registry().unwrap();
        let nested = registry.identities().flat_map(|id| registry.lookup(id));
        for item in registry.top_level_items().iter().chain(nested) {
            assert!(!item.documentation().is_empty(), "{} lacks documentation", item.label());
            assert!(!item.detail().is_empty(), "{} lacks detail", item.label());
        }
    }

    #[test]
    fn test_relabel_replacement_keeps_backreference() {
        let registry = builtin_registry().unwrap();
        let replacement = registry
            .lookup("rule")
            .iter()
            .find(|item| item.label() == "replacement")
            .unwrap();
        assert_eq!(replacement.template().to_plain_text(), r#"replacement = "$1""#);
    }
}
