//! Prompt Builder System
//!
//! Renders an [`AnalysisRequest`] into the natural-language instruction sent
//! to the completion provider.
//!
//! ## Layout
//!
//! 1. **Instruction**: what to produce
//! 2. **Project facts**: environment and databases
//! 3. **Change goal**: branch on the goal step, then considerations
//! 4. **External integrations**
//! 5. **Output constraints**: fixed
//!
//! Rendering is pure and never fails. Request values are interpolated
//! verbatim; blank goal text degrades to a placeholder.

use crate::types::{AnalysisRequest, CallType, Criticality, ExternalIntegration, Goal, GoalStep};

/// System message sent with every analysis call
pub const SYSTEM_INSTRUCTION: &str = "시니어 아키텍처 컨설턴트. 서로 다른 3가지 기술 옵션을 근거 기반으로 생성. 규칙: 1) 근거 3-5개(URL 포함) 2) 실무 적용 가능한 구체적 단계 제시 3) 정량 수치는 단위 표기. 마크다운 금지.";

const INSTRUCTION: &str = "아래 \"프로젝트 정보\"를 바탕으로, 실행 가능한 아키텍처 옵션 3개 생성. JSON 외의 모든 텍스트 출력 금지.";

const OUTPUT_CONSTRAINTS: [&str; 4] = [
    "옵션 수: 3",
    "각 옵션은 상이한 접근 방식일 것",
    "각 옵션의 근거 제공(URL 포함)",
    "모든 수치에 단위를 표기",
];

/// Shown in place of blank goal text
pub const PLACEHOLDER: &str = "(입력되지 않음)";

const NONE_LABEL: &str = "없음";

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Leading instruction line
    Instruction(String),
    /// Bracketed header followed by `- ` items
    List { header: String, items: Vec<String> },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instruction(mut self, content: &str) -> Self {
        self.sections
            .push(PromptSection::Instruction(content.to_string()));
        self
    }

    /// Add a list section. An empty list renders a single "none" item.
    pub fn list(mut self, header: &str, items: Vec<String>) -> Self {
        self.sections.push(PromptSection::List {
            header: header.to_string(),
            items,
        });
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let blocks: Vec<String> = self
            .sections
            .into_iter()
            .map(|section| match section {
                PromptSection::Instruction(content) => format!("[지시] {}", content),
                PromptSection::List { header, items } => {
                    let mut block = format!("[{}]", header);
                    if items.is_empty() {
                        block.push_str(&format!("\n- {}", NONE_LABEL));
                    }
                    for item in items {
                        block.push_str("\n- ");
                        block.push_str(&item);
                    }
                    block
                }
            })
            .collect();

        blocks.join("\n\n")
    }
}

/// Render the analysis prompt for a request
pub fn render_analysis_prompt(request: &AnalysisRequest) -> String {
    PromptBuilder::new()
        .instruction(INSTRUCTION)
        .list("프로젝트 정보", environment_items(request))
        .list("변경 목표", goal_items(&request.goal))
        .list(
            "외부 연동",
            request
                .external_integrations
                .iter()
                .map(integration_item)
                .collect(),
        )
        .list(
            "출력 제약",
            OUTPUT_CONSTRAINTS.iter().map(|c| c.to_string()).collect(),
        )
        .build()
}

fn environment_items(request: &AnalysisRequest) -> Vec<String> {
    let env = &request.environment;
    let mut items = vec![
        format!("프레임워크: {}", env.framework),
        format!("프레임워크 버전: {}", env.version),
        format!("언어: {}", env.language),
        format!("런타임 버전: {}", env.runtime),
        format!("아키텍처: {}", env.architecture),
        format!("클라우드: {}", env.cloud),
    ];

    items.extend(
        env.databases
            .iter()
            .enumerate()
            .map(|(idx, db)| format!("데이터베이스{}: {} {}", idx + 1, db.database, db.version)),
    );

    items
}

fn goal_items(goal: &Goal) -> Vec<String> {
    let mut items = match &goal.step {
        GoalStep::New { feature_summary } => vec![
            "스텝: 신규".to_string(),
            format!("기능요약: {}", or_placeholder(feature_summary)),
        ],
        GoalStep::Refactoring {
            current_state,
            desired_state,
        } => vec![
            "스텝: 리팩토링".to_string(),
            format!("현재 상태(as-is): {}", or_placeholder(current_state)),
            format!("희망 상태(to-be): {}", or_placeholder(desired_state)),
        ],
    };

    items.extend(
        goal.considerations
            .iter()
            .enumerate()
            .map(|(idx, c)| format!("고려사항{}: {}", idx + 1, c)),
    );

    items
}

fn integration_item(integration: &ExternalIntegration) -> String {
    let criticality = match integration.criticality {
        Criticality::Critical => "치명",
        Criticality::NonCritical => "비치명",
    };
    let call_type = match integration.call_type {
        CallType::Sync => "동기",
        CallType::Async => "비동기",
    };

    format!(
        "이름: {}\n  - 중요도: {} ({})\n  - 호출 방식: {} ({})\n  - API 설명: {}",
        integration.name,
        criticality,
        integration.criticality.as_str(),
        call_type,
        integration.call_type.as_str(),
        integration.description
    )
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArchitectureStyle, Database, Environment};
    use proptest::prelude::*;

    fn environment() -> Environment {
        Environment {
            framework: "spring-boot".to_string(),
            version: "2.7.x".to_string(),
            language: "java".to_string(),
            runtime: "11".to_string(),
            architecture: ArchitectureStyle::Monolithic,
            cloud: "aws-ec2".to_string(),
            databases: vec![Database {
                database: "mysql".to_string(),
                version: "8.0".to_string(),
            }],
        }
    }

    fn request(step: GoalStep) -> AnalysisRequest {
        AnalysisRequest {
            environment: environment(),
            goal: Goal {
                step,
                considerations: vec!["매칭은 SMS 실패와 무관하게 성공".to_string()],
            },
            external_integrations: vec![ExternalIntegration {
                name: "sms_provider".to_string(),
                criticality: Criticality::NonCritical,
                call_type: CallType::Sync,
                description: "SMS 발송 API".to_string(),
            }],
        }
    }

    #[test]
    fn test_new_feature_goal() {
        let prompt = render_analysis_prompt(&request(GoalStep::New {
            feature_summary: "Add SMS retry".to_string(),
        }));

        assert!(prompt.contains("기능요약: Add SMS retry"));
        assert!(prompt.contains("스텝: 신규"));
        assert!(!prompt.contains("현재 상태"));
        assert!(!prompt.contains("희망 상태"));
    }

    #[test]
    fn test_refactoring_goal() {
        let prompt = render_analysis_prompt(&request(GoalStep::Refactoring {
            current_state: "p95 1500ms".to_string(),
            desired_state: "p95 800ms".to_string(),
        }));

        assert!(prompt.contains("- 현재 상태(as-is): p95 1500ms"));
        assert!(prompt.contains("- 희망 상태(to-be): p95 800ms"));
        assert!(!prompt.contains("기능요약"));
    }

    #[test]
    fn test_sections_in_order() {
        let prompt = render_analysis_prompt(&request(GoalStep::New {
            feature_summary: "x".to_string(),
        }));

        let positions: Vec<usize> = [
            "[지시]",
            "[프로젝트 정보]",
            "[변경 목표]",
            "[외부 연동]",
            "[출력 제약]",
        ]
        .iter()
        .map(|h| prompt.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(prompt.ends_with("- 모든 수치에 단위를 표기"));
    }

    #[test]
    fn test_environment_and_integration_lines() {
        let prompt = render_analysis_prompt(&request(GoalStep::New {
            feature_summary: "x".to_string(),
        }));

        assert!(prompt.contains("- 프레임워크: spring-boot"));
        assert!(prompt.contains("- 아키텍처: monolithic"));
        assert!(prompt.contains("- 데이터베이스1: mysql 8.0"));
        assert!(prompt.contains("- 고려사항1: 매칭은 SMS 실패와 무관하게 성공"));
        assert!(prompt.contains("- 이름: sms_provider"));
        assert!(prompt.contains("중요도: 비치명 (non-critical)"));
        assert!(prompt.contains("호출 방식: 동기 (sync)"));
    }

    #[test]
    fn test_blank_goal_uses_placeholder() {
        let prompt = render_analysis_prompt(&request(GoalStep::New {
            feature_summary: "  ".to_string(),
        }));
        assert!(prompt.contains(&format!("기능요약: {}", PLACEHOLDER)));
    }

    #[test]
    fn test_no_integrations() {
        let mut req = request(GoalStep::New {
            feature_summary: "x".to_string(),
        });
        req.external_integrations.clear();
        let prompt = render_analysis_prompt(&req);
        assert!(prompt.contains("[외부 연동]\n- 없음"));
    }

    fn text() -> impl Strategy<Value = String> {
        "[^\\s]{1,12}( [^\\s]{1,12}){0,3}"
    }

    proptest! {
        #[test]
        fn prop_request_fields_appear_verbatim(
            framework in text(),
            version in text(),
            language in text(),
            runtime in text(),
            cloud in text(),
            db in text(),
            summary in text(),
            considerations in proptest::collection::vec(text(), 0..4),
            names in proptest::collection::vec(text(), 0..3),
            description in text(),
        ) {
            let mut req = request(GoalStep::New { feature_summary: summary.clone() });
            req.environment.framework = framework.clone();
            req.environment.version = version.clone();
            req.environment.language = language.clone();
            req.environment.runtime = runtime.clone();
            req.environment.cloud = cloud.clone();
            req.environment.databases[0].database = db.clone();
            req.goal.considerations = considerations.clone();
            req.external_integrations = names
                .iter()
                .map(|name| ExternalIntegration {
                    name: name.clone(),
                    criticality: Criticality::Critical,
                    call_type: CallType::Async,
                    description: description.clone(),
                })
                .collect();

            let prompt = render_analysis_prompt(&req);

            for field in [&framework, &version, &language, &runtime, &cloud, &db, &summary] {
                prop_assert!(prompt.contains(field.as_str()));
            }
            for consideration in &considerations {
                prop_assert!(prompt.contains(consideration.as_str()));
            }
            for name in &names {
                let name_line = format!("이름: {}", name);
                let description_line = format!("API 설명: {}", description);
                prop_assert!(prompt.contains(&name_line));
                prop_assert!(prompt.contains(&description_line));
            }
        }
    }
}
