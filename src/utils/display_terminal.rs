//! 터미널 출력 포맷팅 유틸리티
//!
//! 서비스 시작 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 완료/실패 상태 등을 시각적으로 표현합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║              🔄 STARTING ML SERVICES             ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Initializing persistent store (mongodb)
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 처리된 항목 수와 함께 표시합니다
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 진행 단계 실패를 표시합니다
pub fn print_step_failed(step: u8, description: &str) {
    println!("✗ Step {}: {}", step, description);
}

/// 서브 작업의 상태를 들여쓰기된 트리 형태로 표시합니다
///
/// ```text
///    ├─ mongodb: ✓ Ready
///    ├─ translation: remote-translation
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 시작 완료 요약을 출력합니다
///
/// # Arguments
///
/// * `dependencies` - 초기화된 외부 의존성 수
/// * `services` - 설치된 도메인 서비스 수
pub fn print_final_summary(dependencies: usize, services: usize) {
    println!();
    print_boxed_title("🎉 ML SERVICES READY");
    println!("   🔌 Dependencies: {}", dependencies);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", dependencies + services);
    println!();
}
