//! Canned matching/SMS record
//!
//! Narrative is fixed; only the header fields vary.

use super::{AdrDraft, Decision, OptionRow, Reference, ReportSource};
use crate::results::ResultsView;
use crate::types::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn row(label: &str, score: u8, expected_effect: &str, side_effect: &str) -> OptionRow {
    OptionRow {
        label: label.to_string(),
        score: Some(score),
        expected_effect: expected_effect.to_string(),
        side_effect: side_effect.to_string(),
    }
}

fn reference(title: &str, url: &str, date: &str) -> Reference {
    Reference {
        title: title.to_string(),
        url: url.to_string(),
        date: Some(date.to_string()),
    }
}

impl ReportSource for FixtureSource {
    fn draft(&self, _view: &ResultsView) -> Result<AdrDraft> {
        Ok(AdrDraft {
            file_stem: "matching-async-sms".to_string(),
            title: "ADR: 매칭 신청 SMS 비동기 처리".to_string(),
            context: "현재 매칭 신청 API의 p95 응답시간이 1500ms로 목표치인 800ms를 초과하고 있습니다.\n\
                      주요 원인은 SMS 전송 처리가 동기적으로 이루어지며 외부 API 타임아웃(1000ms)으로 인한 지연입니다."
                .to_string(),
            context_points: strings(&[
                "**목표 p95:** 800ms",
                "**현재 p95:** 1500ms (매칭 신청), 2400ms (매칭 수락)",
                "**허용 지연:** 30초",
                "**외부 연동:** sms_provider(비치명, 동기, 1000ms), recommendation_api(비치명, 800ms)",
                "**실패 정책:** 분리 후 대기열",
            ]),
            options: vec![
                row("A - 트랜잭셔널 아웃박스", 86, "p95↓, 성공률↑, 감사추적", "최종 일관성, 워커 운영"),
                row("B - SQS 큐 + 워커 + DLQ", 81, "버스트흡수, 타임아웃 분리", "DLQ 운영, 멱등 필요"),
                row("C - 회로차단 + 타임리미터", 74, "실패격리, 대체응답", "폴백 품질 의존"),
            ],
            decision: Decision {
                option: "옵션 A - 트랜잭셔널 아웃박스".to_string(),
                rationale: "아웃박스 패턴을 선택한 이유:".to_string(),
                reasons: strings(&[
                    "트랜잭션 일관성을 보장하면서 비동기 처리 가능",
                    "감사 추적 및 디버깅이 용이 (outbox_events 테이블)",
                    "SMS 실패 시에도 매칭 성공 처리 가능",
                    "기존 Spring Boot + MySQL 스택에 가장 적합",
                ]),
            },
            pros: strings(&[
                "p95 응답시간 800ms 이하로 개선 예상",
                "트랜잭션 일관성 보장",
                "실패한 메시지 자동 재처리",
                "감사 추적 및 디버깅 용이",
            ]),
            cons: strings(&[
                "최종 일관성 모델 (SMS가 즉시 전송되지 않음)",
                "워커 프로세스 운영 필요",
                "outbox_events 테이블 용량 관리 필요",
                "멱등성 키 기반 중복 처리 방지 필수",
            ]),
            steps: strings(&[
                "outbox_events 테이블 추가 (event_type, payload, status, created_at)",
                "매칭 신청 트랜잭션 내 outbox INSERT 추가",
                "@TransactionalEventListener(AFTER_COMMIT) 폴러 구현",
                "SMS 전송 실패 시 DLQ로 이동, 재시도 로직 구현",
                "처리 완료 후 outbox 레코드 PROCESSED 상태 업데이트",
            ]),
            rollback: strings(&[
                "워커 중지 후 기존 동기 SMS 전송 로직으로 복원",
                "outbox_events 테이블은 유지 (감사 로그로 활용)",
            ]),
            references: vec![
                reference(
                    "Transactional Outbox Pattern - Martin Fowler",
                    "https://martinfowler.com/articles/patterns-outbox.html",
                    "2023-05-15",
                ),
                reference(
                    "Spring Boot Event-Driven Architecture Best Practices",
                    "https://spring.io/guides/event-driven",
                    "2024-02-20",
                ),
                reference(
                    "AWS SQS와 DLQ를 활용한 메시지 처리 패턴",
                    "https://docs.aws.amazon.com/sqs/dlq-patterns.html",
                    "2023-11-30",
                ),
            ],
        })
    }
}
